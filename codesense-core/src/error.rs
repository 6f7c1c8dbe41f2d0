//! Error types for CodeSense

use thiserror::Error;

/// Result type alias for CodeSense operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for CodeSense operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid review submission (client-caused, never retried)
    #[error("{0}")]
    Validation(String),

    /// External analysis process failed to start or exited nonzero
    #[error("{0}")]
    Process(String),

    /// Analysis output was unparseable or carried a self-reported error
    #[error("{0}")]
    MalformedOutput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
