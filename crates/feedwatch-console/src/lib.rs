//! Terminal console for monitoring the candle ingestion service.
//!
//! Wires the API client and state store together behind a set of
//! subcommands: a long-running `watch` loop plus one-shot queries and
//! subscription management.

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, RefreshConfig};
pub use error::{AppError, AppResult};
