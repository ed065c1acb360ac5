//! HTTP client for the ingestion service REST API.

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use feedwatch_core::{
    ApiResponse, Candle, ConnectionInfo, ReconnectionRecord, ReconnectionStats, SubscriptionInfo,
    SystemMetrics,
};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::error;

/// Default `limit` for reconnection history requests.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Default `limit` for candle requests.
pub const DEFAULT_CANDLE_LIMIT: u32 = 300;

/// Request body for subscription add/remove endpoints.
#[derive(Debug, Serialize)]
struct SubscriptionRequest<'a> {
    symbol: &'a str,
    interval: &'a str,
}

/// Backend API surface consumed by the state store.
///
/// Implemented by [`ApiClient`]; tests substitute a scripted fake.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn connection_status(&self) -> ApiResult<ApiResponse<ConnectionInfo>>;
    async fn reconnection_history(
        &self,
        limit: u32,
    ) -> ApiResult<ApiResponse<Vec<ReconnectionRecord>>>;
    async fn reconnection_stats(&self) -> ApiResult<ApiResponse<ReconnectionStats>>;
    async fn system_metrics(&self) -> ApiResult<ApiResponse<SystemMetrics>>;
    async fn subscriptions(&self) -> ApiResult<ApiResponse<Vec<SubscriptionInfo>>>;
    async fn reconnect(&self) -> ApiResult<ApiResponse<serde_json::Value>>;
    async fn add_subscription(
        &self,
        symbol: &str,
        interval: &str,
    ) -> ApiResult<ApiResponse<serde_json::Value>>;
    async fn remove_subscription(
        &self,
        symbol: &str,
        interval: &str,
    ) -> ApiResult<ApiResponse<serde_json::Value>>;
    async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> ApiResult<ApiResponse<Vec<Candle>>>;
}

/// Client for the ingestion service REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, check the HTTP status, and parse the envelope.
    ///
    /// Every failing request is logged here before the error is
    /// returned; no retry is attempted at this layer.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        op: &'static str,
    ) -> ApiResult<ApiResponse<T>> {
        let response = request.send().await.map_err(|e| {
            error!(op, error = %e, "API request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(op, status = status.as_u16(), %body, "API request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<ApiResponse<T>>().await.map_err(|e| {
            error!(op, error = %e, "Failed to parse API response");
            ApiError::Parse(e)
        })
    }

    /// GET /websocket/status
    pub async fn connection_status(&self) -> ApiResult<ApiResponse<ConnectionInfo>> {
        self.send(self.http.get(self.url("/websocket/status")), "connection_status")
            .await
    }

    /// GET /websocket/reconnect-history?limit=N
    pub async fn reconnection_history(
        &self,
        limit: u32,
    ) -> ApiResult<ApiResponse<Vec<ReconnectionRecord>>> {
        let request = self
            .http
            .get(self.url("/websocket/reconnect-history"))
            .query(&[("limit", limit)]);
        self.send(request, "reconnection_history").await
    }

    /// GET /websocket/reconnect-stats
    pub async fn reconnection_stats(&self) -> ApiResult<ApiResponse<ReconnectionStats>> {
        self.send(
            self.http.get(self.url("/websocket/reconnect-stats")),
            "reconnection_stats",
        )
        .await
    }

    /// GET /metrics
    pub async fn system_metrics(&self) -> ApiResult<ApiResponse<SystemMetrics>> {
        self.send(self.http.get(self.url("/metrics")), "system_metrics")
            .await
    }

    /// GET /subscriptions
    pub async fn subscriptions(&self) -> ApiResult<ApiResponse<Vec<SubscriptionInfo>>> {
        self.send(self.http.get(self.url("/subscriptions")), "subscriptions")
            .await
    }

    /// POST /websocket/reconnect
    ///
    /// The payload is backend-defined (usually a human-readable note);
    /// callers only rely on the envelope's `success` flag.
    pub async fn reconnect(&self) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.send(self.http.post(self.url("/websocket/reconnect")), "reconnect")
            .await
    }

    /// POST /websocket/subscriptions with `{symbol, interval}`.
    pub async fn add_subscription(
        &self,
        symbol: &str,
        interval: &str,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        let request = self
            .http
            .post(self.url("/websocket/subscriptions"))
            .json(&SubscriptionRequest { symbol, interval });
        self.send(request, "add_subscription").await
    }

    /// DELETE /websocket/subscriptions with `{symbol, interval}` as body.
    pub async fn remove_subscription(
        &self,
        symbol: &str,
        interval: &str,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        let request = self
            .http
            .delete(self.url("/websocket/subscriptions"))
            .json(&SubscriptionRequest { symbol, interval });
        self.send(request, "remove_subscription").await
    }

    /// GET /candles?symbol=&interval=&limit=
    pub async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> ApiResult<ApiResponse<Vec<Candle>>> {
        let request = self
            .http
            .get(self.url("/candles"))
            .query(&[("symbol", symbol), ("interval", interval)])
            .query(&[("limit", limit)]);
        self.send(request, "candles").await
    }
}

#[async_trait]
impl BackendApi for ApiClient {
    async fn connection_status(&self) -> ApiResult<ApiResponse<ConnectionInfo>> {
        ApiClient::connection_status(self).await
    }

    async fn reconnection_history(
        &self,
        limit: u32,
    ) -> ApiResult<ApiResponse<Vec<ReconnectionRecord>>> {
        ApiClient::reconnection_history(self, limit).await
    }

    async fn reconnection_stats(&self) -> ApiResult<ApiResponse<ReconnectionStats>> {
        ApiClient::reconnection_stats(self).await
    }

    async fn system_metrics(&self) -> ApiResult<ApiResponse<SystemMetrics>> {
        ApiClient::system_metrics(self).await
    }

    async fn subscriptions(&self) -> ApiResult<ApiResponse<Vec<SubscriptionInfo>>> {
        ApiClient::subscriptions(self).await
    }

    async fn reconnect(&self) -> ApiResult<ApiResponse<serde_json::Value>> {
        ApiClient::reconnect(self).await
    }

    async fn add_subscription(
        &self,
        symbol: &str,
        interval: &str,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        ApiClient::add_subscription(self, symbol, interval).await
    }

    async fn remove_subscription(
        &self,
        symbol: &str,
        interval: &str,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        ApiClient::remove_subscription(self, symbol, interval).await
    }

    async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> ApiResult<ApiResponse<Vec<Candle>>> {
        ApiClient::candles(self, symbol, interval, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_request_serialization() {
        let request = SubscriptionRequest {
            symbol: "BTC-USDT",
            interval: "1m",
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"symbol":"BTC-USDT","interval":"1m"}"#);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            timeout_ms: 10_000,
        })
        .unwrap();
        assert_eq!(client.url("/metrics"), "http://localhost:8080/api/metrics");
    }
}
