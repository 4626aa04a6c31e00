use shared::error::ErrorCode;
use thiserror::Error;

/// Every failure a user action can surface: transport problems, non-2xx
/// application responses and client-side validation, per the console's
/// error taxonomy. Nothing here is fatal and nothing is retried
/// automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Api {
        code: ErrorCode,
        status: u16,
        message: String,
    },
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),
    #[error("{0}")]
    Validation(String),
    #[error("not logged in")]
    NotLoggedIn,
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
