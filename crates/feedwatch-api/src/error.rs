//! API client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(reqwest::Error),
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
