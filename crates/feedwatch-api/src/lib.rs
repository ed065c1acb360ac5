//! HTTP client for the feedwatch ingestion service API.
//!
//! Single point of outbound communication: a fixed base URL, a 10-second
//! request timeout, and one method per backend endpoint. Transport and
//! HTTP-status failures are logged here and returned as [`ApiError`];
//! the envelope's own `success=false` channel is passed through to the
//! caller untouched.

pub mod client;
pub mod config;
pub mod error;

pub use client::{ApiClient, BackendApi, DEFAULT_CANDLE_LIMIT, DEFAULT_HISTORY_LIMIT};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
