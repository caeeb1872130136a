//! Error handling module
//!
//! The engine itself is fault-isolating per field: locator and matcher misses
//! are logged and swallowed inside a fill pass. The variants here cover the
//! boundary: operator input, the messaging channel, storage and config.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutofillError {
    /// No control or option matched
    #[error("not found: {0}")]
    NotFound(String),

    /// Operator-supplied data was rejected wholesale
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request/response channel to the page agent failed
    #[error("messaging failure: {0}")]
    MessagingFailure(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),
}

impl AutofillError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Message suitable for showing to the operator
    pub fn user_message(&self) -> String {
        match self {
            AutofillError::InvalidInput(message) => message.clone(),
            AutofillError::MessagingFailure(message) => format!("Error: {}", message),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for AutofillError {
    fn from(err: serde_json::Error) -> Self {
        AutofillError::InvalidInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AutofillError>;
