//! Dashboard state container and polling loop.

use crate::error::StoreResult;
use feedwatch_api::{BackendApi, DEFAULT_HISTORY_LIMIT};
use feedwatch_core::{
    ConnectionInfo, ConnectionStatus, ReconnectionRecord, SubscriptionInfo, SystemMetrics,
};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Default auto-refresh interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// User-visible message when the connection status fetch fails.
const CONNECTION_STATUS_ERROR: &str = "Failed to fetch connection status";

/// User-visible message when triggering a reconnect fails.
const RECONNECT_ERROR: &str = "Failed to trigger reconnection";

/// Running auto-refresh poller.
struct RefreshTask {
    cancel: CancellationToken,
    _handle: JoinHandle<()>,
}

/// State container for the monitoring view.
///
/// Holds the latest known value of each remote resource and provides
/// imperative refresh actions plus a background polling loop. Cloning
/// is cheap; clones share the same state.
///
/// Snapshots are replaced wholesale on every successful fetch, never
/// patched in place, so readers never observe torn values. No ordering
/// is guaranteed between concurrent fetches of the same resource: the
/// response that resolves last wins.
#[derive(Clone)]
pub struct DashboardStore {
    api: Arc<dyn BackendApi>,
    connection_info: Arc<RwLock<ConnectionInfo>>,
    reconnection_history: Arc<RwLock<Vec<ReconnectionRecord>>>,
    system_metrics: Arc<RwLock<SystemMetrics>>,
    subscriptions: Arc<RwLock<Vec<SubscriptionInfo>>>,
    loading: Arc<RwLock<bool>>,
    error: Arc<RwLock<Option<String>>>,
    refresh: Arc<Mutex<Option<RefreshTask>>>,
}

impl DashboardStore {
    /// Create a store backed by the given API implementation.
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self {
            api,
            connection_info: Arc::new(RwLock::new(ConnectionInfo::default())),
            reconnection_history: Arc::new(RwLock::new(Vec::new())),
            system_metrics: Arc::new(RwLock::new(SystemMetrics::default())),
            subscriptions: Arc::new(RwLock::new(Vec::new())),
            loading: Arc::new(RwLock::new(false)),
            error: Arc::new(RwLock::new(None)),
            refresh: Arc::new(Mutex::new(None)),
        }
    }

    // --- Snapshot accessors ---

    pub fn connection_info(&self) -> ConnectionInfo {
        self.connection_info.read().clone()
    }

    pub fn reconnection_history(&self) -> Vec<ReconnectionRecord> {
        self.reconnection_history.read().clone()
    }

    pub fn system_metrics(&self) -> SystemMetrics {
        self.system_metrics.read().clone()
    }

    pub fn subscriptions(&self) -> Vec<SubscriptionInfo> {
        self.subscriptions.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.read()
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }

    // --- Derived state ---

    /// Whether the backend reports an established connection.
    pub fn is_connected(&self) -> bool {
        self.connection_info.read().status == ConnectionStatus::Connected
    }

    /// Whether the backend is currently reconnecting.
    pub fn is_reconnecting(&self) -> bool {
        self.connection_info.read().status == ConnectionStatus::Reconnecting
    }

    // --- Fetch actions ---

    /// Refresh the connection status snapshot.
    ///
    /// Transport failures surface through the visible `error` field;
    /// a `success=false` envelope skips replacement silently. The
    /// `loading` flag is cleared on every path.
    pub async fn fetch_connection_status(&self) {
        *self.loading.write() = true;
        *self.error.write() = None;

        match self.api.connection_status().await {
            Ok(resp) => {
                if let Some(info) = resp.into_data() {
                    *self.connection_info.write() = info;
                }
            }
            Err(e) => {
                *self.error.write() = Some(CONNECTION_STATUS_ERROR.to_string());
                error!(error = %e, "Failed to fetch connection status");
            }
        }

        *self.loading.write() = false;
    }

    /// Refresh the reconnection history snapshot. Failures are logged
    /// only; observers see no error state.
    pub async fn fetch_reconnection_history(&self) {
        match self.api.reconnection_history(DEFAULT_HISTORY_LIMIT).await {
            Ok(resp) => {
                if let Some(history) = resp.into_data() {
                    *self.reconnection_history.write() = history;
                }
            }
            Err(e) => warn!(error = %e, "Failed to fetch reconnection history"),
        }
    }

    /// Refresh the system metrics snapshot. Failures are logged only.
    pub async fn fetch_system_metrics(&self) {
        match self.api.system_metrics().await {
            Ok(resp) => {
                if let Some(metrics) = resp.into_data() {
                    *self.system_metrics.write() = metrics;
                }
            }
            Err(e) => warn!(error = %e, "Failed to fetch system metrics"),
        }
    }

    /// Refresh the subscriptions snapshot. Failures are logged only.
    pub async fn fetch_subscriptions(&self) {
        match self.api.subscriptions().await {
            Ok(resp) => {
                if let Some(subs) = resp.into_data() {
                    *self.subscriptions.write() = subs;
                }
            }
            Err(e) => warn!(error = %e, "Failed to fetch subscriptions"),
        }
    }

    // --- Mutating actions ---

    /// Ask the backend to reconnect, then re-fetch the connection
    /// status. Failures surface through the visible `error` field.
    pub async fn trigger_reconnect(&self) {
        *self.loading.write() = true;

        match self.api.reconnect().await {
            Ok(_) => self.fetch_connection_status().await,
            Err(e) => {
                *self.error.write() = Some(RECONNECT_ERROR.to_string());
                error!(error = %e, "Failed to trigger reconnection");
            }
        }

        *self.loading.write() = false;
    }

    /// Add a subscription, then re-fetch the subscription list.
    ///
    /// Unlike the fetch actions, failures propagate to the caller so
    /// the invoking surface can react.
    pub async fn add_subscription(&self, symbol: &str, interval: &str) -> StoreResult<()> {
        match self.api.add_subscription(symbol, interval).await {
            Ok(_) => {
                self.fetch_subscriptions().await;
                Ok(())
            }
            Err(e) => {
                error!(symbol, interval, error = %e, "Failed to add subscription");
                Err(e.into())
            }
        }
    }

    /// Remove a subscription, then re-fetch the subscription list.
    /// Failures propagate to the caller.
    pub async fn remove_subscription(&self, symbol: &str, interval: &str) -> StoreResult<()> {
        match self.api.remove_subscription(symbol, interval).await {
            Ok(_) => {
                self.fetch_subscriptions().await;
                Ok(())
            }
            Err(e) => {
                error!(symbol, interval, error = %e, "Failed to remove subscription");
                Err(e.into())
            }
        }
    }

    // --- Auto refresh ---

    /// Start the background polling loop.
    ///
    /// Cancels any existing poller first, so repeated calls never stack
    /// timers. Each tick spawns a fire-and-forget task running the
    /// connection-status, metrics, and subscriptions fetches; ticks are
    /// not mutually excluded, so under a slow backend responses may
    /// arrive out of order (last response wins).
    pub fn start_auto_refresh(&self, interval: Duration) {
        self.stop_auto_refresh();

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let store = self.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() yields immediately; consume that tick so the
            // first refresh lands one full interval after start.
            ticker.tick().await;

            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        debug!("Auto refresh cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let tick_store = store.clone();
                        tokio::spawn(async move {
                            tokio::join!(
                                tick_store.fetch_connection_status(),
                                tick_store.fetch_system_metrics(),
                                tick_store.fetch_subscriptions(),
                            );
                        });
                    }
                }
            }
        });

        *self.refresh.lock() = Some(RefreshTask {
            cancel,
            _handle: handle,
        });
    }

    /// Stop the background polling loop. Idempotent.
    ///
    /// Only prevents future ticks; requests already dispatched run to
    /// completion and may still replace snapshots.
    pub fn stop_auto_refresh(&self) {
        if let Some(task) = self.refresh.lock().take() {
            task.cancel.cancel();
        }
    }

    /// Whether the polling loop is currently active.
    pub fn is_auto_refreshing(&self) -> bool {
        self.refresh.lock().is_some()
    }
}

impl std::fmt::Debug for DashboardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardStore")
            .field("status", &self.connection_info.read().status)
            .field("subscriptions", &self.subscriptions.read().len())
            .field("auto_refresh", &self.is_auto_refreshing())
            .finish()
    }
}
