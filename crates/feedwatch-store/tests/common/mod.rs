//! Scripted fake backend for store tests.

// Not every test binary uses every builder.
#![allow(dead_code)]

use async_trait::async_trait;
use feedwatch_api::{ApiError, ApiResult, BackendApi};
use feedwatch_core::{
    ApiResponse, Candle, ConnectionInfo, ConnectionStatus, ReconnectionRecord, ReconnectionStats,
    SubscriptionInfo, SystemMetrics,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

const FAKE_TIMESTAMP: &str = "2024-05-01T09:30:00Z";

/// Programmed behavior for one endpoint.
pub enum Script<T> {
    /// Resolve with `success=true` and this payload.
    Ok(T),
    /// Resolve with a `success=false` envelope (application failure).
    EnvelopeError(&'static str),
    /// Reject at the transport/HTTP layer.
    HttpError,
}

impl<T: Clone> Script<T> {
    fn resolve(&self) -> ApiResult<ApiResponse<T>> {
        match self {
            Script::Ok(data) => Ok(ok_envelope(data.clone())),
            Script::EnvelopeError(msg) => Ok(ApiResponse {
                success: false,
                data: None,
                error: Some((*msg).to_string()),
                timestamp: FAKE_TIMESTAMP.to_string(),
            }),
            Script::HttpError => Err(ApiError::Status {
                status: 500,
                body: "internal error".to_string(),
            }),
        }
    }
}

pub fn ok_envelope<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        timestamp: FAKE_TIMESTAMP.to_string(),
    }
}

/// In-process fake of the backend API with per-endpoint scripts and
/// call counters.
pub struct FakeBackend {
    pub status: Mutex<Script<ConnectionInfo>>,
    pub history: Mutex<Script<Vec<ReconnectionRecord>>>,
    pub stats: Mutex<Script<ReconnectionStats>>,
    pub metrics: Mutex<Script<SystemMetrics>>,
    pub subs: Mutex<Script<Vec<SubscriptionInfo>>>,
    pub reconnect: Mutex<Script<serde_json::Value>>,
    pub add: Mutex<Script<serde_json::Value>>,
    pub remove: Mutex<Script<serde_json::Value>>,

    pub status_calls: AtomicUsize,
    pub metrics_calls: AtomicUsize,
    pub subs_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub reconnect_calls: AtomicUsize,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            status: Mutex::new(Script::Ok(ConnectionInfo::default())),
            history: Mutex::new(Script::Ok(Vec::new())),
            stats: Mutex::new(Script::Ok(ReconnectionStats::default())),
            metrics: Mutex::new(Script::Ok(SystemMetrics::default())),
            subs: Mutex::new(Script::Ok(Vec::new())),
            reconnect: Mutex::new(Script::Ok(serde_json::Value::Null)),
            add: Mutex::new(Script::Ok(serde_json::Value::Null)),
            remove: Mutex::new(Script::Ok(serde_json::Value::Null)),
            status_calls: AtomicUsize::new(0),
            metrics_calls: AtomicUsize::new(0),
            subs_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            reconnect_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn connection_status(&self) -> ApiResult<ApiResponse<ConnectionInfo>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status.lock().resolve()
    }

    async fn reconnection_history(
        &self,
        _limit: u32,
    ) -> ApiResult<ApiResponse<Vec<ReconnectionRecord>>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history.lock().resolve()
    }

    async fn reconnection_stats(&self) -> ApiResult<ApiResponse<ReconnectionStats>> {
        self.stats.lock().resolve()
    }

    async fn system_metrics(&self) -> ApiResult<ApiResponse<SystemMetrics>> {
        self.metrics_calls.fetch_add(1, Ordering::SeqCst);
        self.metrics.lock().resolve()
    }

    async fn subscriptions(&self) -> ApiResult<ApiResponse<Vec<SubscriptionInfo>>> {
        self.subs_calls.fetch_add(1, Ordering::SeqCst);
        self.subs.lock().resolve()
    }

    async fn reconnect(&self) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.reconnect_calls.fetch_add(1, Ordering::SeqCst);
        self.reconnect.lock().resolve()
    }

    async fn add_subscription(
        &self,
        _symbol: &str,
        _interval: &str,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.add.lock().resolve()
    }

    async fn remove_subscription(
        &self,
        _symbol: &str,
        _interval: &str,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.remove.lock().resolve()
    }

    async fn candles(
        &self,
        _symbol: &str,
        _interval: &str,
        _limit: u32,
    ) -> ApiResult<ApiResponse<Vec<Candle>>> {
        Ok(ok_envelope(Vec::new()))
    }
}

// --- Test data builders ---

pub fn connected_info() -> ConnectionInfo {
    ConnectionInfo {
        status: ConnectionStatus::Connected,
        url: "wss://ws.example.com/v5/business".to_string(),
        connected_at: Some(FAKE_TIMESTAMP.parse().unwrap()),
        reconnect_attempts: 0,
        ..ConnectionInfo::default()
    }
}

pub fn reconnecting_info(attempts: u32) -> ConnectionInfo {
    ConnectionInfo {
        status: ConnectionStatus::Reconnecting,
        url: "wss://x".to_string(),
        reconnect_attempts: attempts,
        ..ConnectionInfo::default()
    }
}

pub fn subscription(symbol: &str, interval: &str) -> SubscriptionInfo {
    SubscriptionInfo {
        symbol: symbol.to_string(),
        interval: interval.to_string(),
        subscribed_at: FAKE_TIMESTAMP.parse().unwrap(),
        messages_received: 10,
        last_update: FAKE_TIMESTAMP.parse().unwrap(),
    }
}

pub fn history_record(attempt: u32, success: bool) -> ReconnectionRecord {
    ReconnectionRecord {
        id: format!("rec-{attempt}"),
        timestamp: FAKE_TIMESTAMP.parse().unwrap(),
        reason: "transport-error".to_string(),
        attempt,
        success,
        duration: success.then_some(1200),
        error: (!success).then(|| "connect timeout".to_string()),
    }
}
