//! Store error types.

use feedwatch_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("API call failed: {0}")]
    Api(#[from] ApiError),
}

/// Result type alias for store operations that propagate failures.
pub type StoreResult<T> = Result<T, StoreError>;
