pub mod about;
pub mod help;
pub mod iss;
pub mod rounds;
pub mod top;
pub mod train;
