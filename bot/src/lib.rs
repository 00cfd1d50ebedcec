pub mod bot;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{BotError, BotResult};
pub use services::AppState;
