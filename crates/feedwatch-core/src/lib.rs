//! Core data model for the feedwatch ingestion monitor.
//!
//! This crate provides the plain data shapes shared between the HTTP
//! client and the state store:
//! - `ConnectionStatus`, `ConnectionInfo`: WebSocket connection state
//! - `ReconnectionRecord`, `ReconnectionStats`: reconnection history
//! - `SystemMetrics`: backend counters and gauges
//! - `SubscriptionInfo`: active market subscriptions
//! - `Candle`: OHLCV records
//! - `ApiResponse<T>`: the response envelope all endpoints share
//!
//! All types are created by the backend and arrive as fetch results;
//! the client never constructs or mutates them except by whole-value
//! replacement.

pub mod candle;
pub mod envelope;
pub mod metrics;
pub mod status;
pub mod subscription;

pub use candle::Candle;
pub use envelope::ApiResponse;
pub use metrics::SystemMetrics;
pub use status::{ConnectionInfo, ConnectionStatus, ReconnectionRecord, ReconnectionStats};
pub use subscription::SubscriptionInfo;
