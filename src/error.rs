// src/error.rs
// Standardized error types for the Wanderpal client

use thiserror::Error;

/// Main error type for the wanderpal library
#[derive(Error, Debug)]
pub enum ClientError {
    /// Bad credentials or expired token. Surfaced as an inline message.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Malformed or failed chat submission. Surfaced as a synthetic
    /// assistant message, never retried.
    #[error("chat submission failed: {0}")]
    Submission(String),

    /// Transport failure while polling a chat task. Terminates the poll
    /// loop immediately.
    #[error("polling failed: {0}")]
    Poll(String),

    #[error("poll deadline exceeded")]
    Timeout,

    #[error("poll loop cancelled")]
    Cancelled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown error: {0}")]
    Other(String),
}

/// Convenience type alias for Result using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    pub fn poll(msg: impl Into<String>) -> Self {
        Self::Poll(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures that end a poll series without a backend verdict.
    pub fn is_poll_abort(&self) -> bool {
        matches!(self, Self::Poll(_) | Self::Timeout | Self::Cancelled)
    }
}

impl From<String> for ClientError {
    fn from(s: String) -> Self {
        ClientError::Other(s)
    }
}

impl From<ClientError> for String {
    fn from(err: ClientError) -> Self {
        err.to_string()
    }
}
