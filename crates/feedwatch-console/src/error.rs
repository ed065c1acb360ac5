//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(#[from] feedwatch_api::ApiError),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Store error: {0}")]
    Store(#[from] feedwatch_store::StoreError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] feedwatch_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
