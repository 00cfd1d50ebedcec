use thiserror::Error;

/// Failure taxonomy for the command surface. Collaborator errors are mapped
/// into exactly one of these at the service boundary; commands turn them into
/// the fixed user-facing replies via [`BotError::user_message`].
#[derive(Debug, Error)]
pub enum BotError {
    /// The subject alias is not in the category table. No fetch happens.
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    /// The trivia question source failed or returned an unusable response.
    #[error("question fetch failed: {0:#}")]
    FetchFailed(anyhow::Error),

    /// Round generation aborted; nothing was persisted.
    #[error("round generation failed: {0:#}")]
    GenerationFailed(anyhow::Error),

    /// MongoDB read/write failure.
    #[error("persistence error: {0:#}")]
    Persistence(anyhow::Error),
}

impl BotError {
    /// The reply shown to the invoking user. Internal detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            BotError::UnknownSubject(_) => "Not a valid subject!",
            BotError::FetchFailed(_) => {
                "Sorry, there was a problem fetching the question. Please try again!"
            }
            BotError::GenerationFailed(_) => {
                "Sorry, something went wrong generating your round. Please try again!"
            }
            BotError::Persistence(_) => "Uh oh! :( There was an internal error. Please try again.",
        }
    }
}

pub type BotResult<T> = Result<T, BotError>;
