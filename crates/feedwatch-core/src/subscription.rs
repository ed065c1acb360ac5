//! Market subscription types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An active candle subscription on the ingestion service.
///
/// Uniqueness of the (`symbol`, `interval`) pair is a backend
/// invariant, not enforced client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInfo {
    /// Instrument symbol (e.g. "BTC-USDT").
    pub symbol: String,
    /// Candle interval (e.g. "1m", "1H").
    pub interval: String,
    /// When the subscription was established.
    pub subscribed_at: DateTime<Utc>,
    /// Messages received on this subscription.
    pub messages_received: u64,
    /// Last message time for this subscription.
    pub last_update: DateTime<Utc>,
}

impl SubscriptionInfo {
    /// The backend's channel key for this subscription.
    pub fn key(&self) -> String {
        format!("{}:{}", self.symbol, self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_from_backend_json() {
        let json = r#"{
            "symbol": "BTC-USDT",
            "interval": "1m",
            "subscribedAt": "2024-05-01T08:00:00Z",
            "messagesReceived": 5400,
            "lastUpdate": "2024-05-01T09:31:00Z"
        }"#;

        let sub: SubscriptionInfo = serde_json::from_str(json).unwrap();
        assert_eq!(sub.symbol, "BTC-USDT");
        assert_eq!(sub.messages_received, 5400);
        assert_eq!(sub.key(), "BTC-USDT:1m");
    }
}
