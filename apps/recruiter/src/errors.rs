use thiserror::Error;

use crate::index::IndexError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Every variant is reported to the interactive user as a plain message; none ends the session.
#[derive(Debug, Error)]
pub enum AppError {
    /// A command was issued before the state it depends on exists.
    #[error("{0}")]
    Precondition(String),

    #[error("Upstream provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("Vector index error: {0}")]
    Index(#[from] IndexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn precondition(message: impl Into<String>) -> Self {
        AppError::Precondition(message.into())
    }

    /// Text shown to the interactive user. Internal failures are logged in full, shown briefly.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Precondition(msg) => msg.clone(),
            AppError::Provider(e) => {
                tracing::error!("Provider error: {e}");
                format!("The AI service could not complete the request: {e}")
            }
            AppError::Index(e) => {
                tracing::error!("Index error: {e}");
                format!("The candidate index rejected the request: {e}")
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                format!("I/O error: {e}")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
        }
    }
}
