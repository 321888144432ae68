//! Error types for the employer console
//!
//! This module provides structured error definitions using thiserror.
//! Binaries propagate with anyhow at the top level.

use thiserror::Error;

/// Main error type for console operations
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// HTTP request could not be sent or its body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// Response body was not the JSON we expected
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error (terminal, log file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Draft rejected before it was sent
    #[error("Invalid draft: {0}")]
    InvalidDraft(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Other(err.to_string())
    }
}
