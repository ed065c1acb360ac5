//! Console application wiring and subcommand implementations.
//!
//! The long-running `watch` loop goes through the [`DashboardStore`]
//! (auto-refresh polling, derived state). One-shot queries call the
//! API client directly; subscription changes and manual reconnects go
//! through the store so its re-fetch semantics apply.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use feedwatch_api::ApiClient;
use feedwatch_core::ApiResponse;
use feedwatch_store::DashboardStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Main application.
pub struct Application {
    config: AppConfig,
    client: ApiClient,
    store: DashboardStore,
}

impl Application {
    /// Create the application: one API client, one store instance.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = ApiClient::new(&config.api)?;
        let store = DashboardStore::new(Arc::new(client.clone()));
        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// Poll the ingestion service and report until Ctrl-C.
    pub async fn watch(&self) -> AppResult<()> {
        let interval = Duration::from_millis(self.config.refresh.interval_ms);
        info!(
            base_url = %self.config.api.base_url,
            interval_ms = self.config.refresh.interval_ms,
            "Watching ingestion service"
        );

        // Seed every snapshot so the first report is not all defaults.
        tokio::join!(
            self.store.fetch_connection_status(),
            self.store.fetch_system_metrics(),
            self.store.fetch_subscriptions(),
            self.store.fetch_reconnection_history(),
        );
        self.report();

        self.store.start_auto_refresh(interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown requested");
                    break;
                }
                _ = ticker.tick() => self.report(),
            }
        }

        self.store.stop_auto_refresh();
        Ok(())
    }

    /// Log one line summarizing the current snapshots.
    fn report(&self) {
        if let Some(error) = self.store.error() {
            warn!(%error, "Store reported an error");
        }

        let info = self.store.connection_info();
        let metrics = self.store.system_metrics();
        info!(
            status = %info.status,
            reconnect_attempts = info.reconnect_attempts,
            messages = metrics.messages_received,
            msgs_per_sec = metrics.messages_per_second,
            cache_hit_pct = metrics.cache_hit_rate * 100.0,
            subscriptions = self.store.subscriptions().len(),
            "Ingestion status"
        );
    }

    /// Show the WebSocket connection status.
    pub async fn status(&self) -> AppResult<()> {
        let info = unwrap_envelope(self.client.connection_status().await?)?;

        println!("status:             {}", info.status);
        println!("url:                {}", info.url);
        println!("reconnect attempts: {}", info.reconnect_attempts);
        if let Some(at) = info.connected_at {
            println!("connected at:       {at}");
        }
        if let Some(at) = info.disconnected_at {
            println!("disconnected at:    {at}");
        }
        if let Some(at) = info.last_message_time {
            println!("last message:       {at}");
        }
        if let Some(delay) = info.current_reconnect_delay {
            println!("reconnect delay:    {delay} ms");
        }
        Ok(())
    }

    /// Show system metrics.
    pub async fn metrics(&self) -> AppResult<()> {
        let m = unwrap_envelope(self.client.system_metrics().await?)?;

        println!("messages received:   {}", m.messages_received);
        println!("messages per second: {:.1}", m.messages_per_second);
        println!("data processed:      {} bytes", m.data_processed);
        println!("cache hit rate:      {:.1}%", m.cache_hit_rate * 100.0);
        println!("mongodb connections: {}", m.mongodb_connections);
        println!("redis connections:   {}", m.redis_connections);
        println!("memory usage:        {:.1}%", m.memory_usage * 100.0);
        println!("cpu usage:           {:.1}%", m.cpu_usage * 100.0);
        Ok(())
    }

    /// List active candle subscriptions.
    pub async fn subscriptions(&self) -> AppResult<()> {
        let subs = unwrap_envelope(self.client.subscriptions().await?)?;

        if subs.is_empty() {
            println!("no active subscriptions");
            return Ok(());
        }
        for sub in subs {
            println!(
                "{:<20} msgs={:<8} last update {}",
                sub.key(),
                sub.messages_received,
                sub.last_update
            );
        }
        Ok(())
    }

    /// Show reconnection history, newest first as served.
    pub async fn history(&self, limit: Option<u32>) -> AppResult<()> {
        let limit = limit.unwrap_or(self.config.refresh.history_limit);
        let records = unwrap_envelope(self.client.reconnection_history(limit).await?)?;

        if records.is_empty() {
            println!("no reconnection records");
            return Ok(());
        }
        for rec in records {
            let outcome = if rec.success { "ok" } else { "failed" };
            print!(
                "{}  attempt {:<3} {:<8} reason={}",
                rec.timestamp, rec.attempt, outcome, rec.reason
            );
            if let Some(ms) = rec.duration {
                print!(" duration={ms}ms");
            }
            if let Some(err) = &rec.error {
                print!(" error={err}");
            }
            println!();
        }
        Ok(())
    }

    /// Show aggregate reconnection statistics.
    pub async fn stats(&self) -> AppResult<()> {
        let stats = unwrap_envelope(self.client.reconnection_stats().await?)?;

        println!("total records: {}", stats.total_records);
        println!("recent window: {}", stats.recent_count);
        println!("successful:    {}", stats.success_count);
        println!("failed:        {}", stats.failure_count);
        if let Some(rate) = stats.success_rate() {
            println!("success rate:  {:.1}%", rate * 100.0);
        }
        Ok(())
    }

    /// Fetch and print recent candles.
    pub async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: Option<u32>,
    ) -> AppResult<()> {
        let limit = limit.unwrap_or(self.config.refresh.candle_limit);
        let candles = unwrap_envelope(self.client.candles(symbol, interval, limit).await?)?;

        if candles.is_empty() {
            println!("no candles for {symbol} {interval}");
            return Ok(());
        }
        for c in candles {
            let state = if c.is_closed() { " " } else { "*" };
            println!(
                "{} {} o={} h={} l={} c={} v={}{}",
                c.timestamp, c.interval, c.open, c.high, c.low, c.close, c.volume, state
            );
        }
        Ok(())
    }

    /// Trigger a manual reconnect and show the resulting status.
    pub async fn reconnect(&self) -> AppResult<()> {
        self.store.trigger_reconnect().await;

        if let Some(error) = self.store.error() {
            return Err(AppError::Backend(error));
        }
        let info = self.store.connection_info();
        println!("reconnect requested; status now {}", info.status);
        Ok(())
    }

    /// Add a subscription and show the updated list.
    pub async fn subscribe(&self, symbol: &str, interval: &str) -> AppResult<()> {
        self.store.add_subscription(symbol, interval).await?;

        println!(
            "subscribed {symbol} {interval}; {} active",
            self.store.subscriptions().len()
        );
        Ok(())
    }

    /// Remove a subscription and show the updated list.
    pub async fn unsubscribe(&self, symbol: &str, interval: &str) -> AppResult<()> {
        self.store.remove_subscription(symbol, interval).await?;

        println!(
            "unsubscribed {symbol} {interval}; {} active",
            self.store.subscriptions().len()
        );
        Ok(())
    }
}

/// Unwrap an envelope for one-shot commands: application-level
/// failures become visible errors here.
fn unwrap_envelope<T>(resp: ApiResponse<T>) -> AppResult<T> {
    if resp.success {
        resp.data
            .ok_or_else(|| AppError::Backend("response had no payload".to_string()))
    } else {
        Err(AppError::Backend(
            resp.error.unwrap_or_else(|| "unspecified error".to_string()),
        ))
    }
}
