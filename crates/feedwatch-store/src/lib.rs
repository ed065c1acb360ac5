//! State store for the feedwatch monitor.
//!
//! [`DashboardStore`] holds the latest fetched snapshot of each backend
//! resource, exposes derived view state, and owns the auto-refresh
//! polling loop. It is an explicitly constructed, dependency-injected
//! container: built once per application from a [`BackendApi`]
//! implementation, torn down by stopping its poller.
//!
//! [`BackendApi`]: feedwatch_api::BackendApi

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{DashboardStore, DEFAULT_REFRESH_INTERVAL};
