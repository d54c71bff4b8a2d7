//! Data layer error types.

use thiserror::Error;

/// Errors raised while fetching or adapting municipal data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected payload shape: {0}")]
    UnexpectedShape(String),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

/// Result type alias for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
