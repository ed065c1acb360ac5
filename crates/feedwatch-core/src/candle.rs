//! OHLCV candle records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One candle, keyed by (`symbol`, `interval`, `timestamp`).
///
/// Wire field names are lowercase with `created_at` in snake case,
/// matching the ingestion service's candle documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Instrument symbol.
    pub symbol: String,
    /// Candle open time.
    pub timestamp: DateTime<Utc>,
    /// Candle interval (e.g. "1m", "1H").
    pub interval: String,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    /// Exchange confirm flag: "1" once the candle is closed.
    pub confirm: String,
    /// When the record was written by the ingestion service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Candle {
    /// Whether the candle is closed (confirmed by the exchange).
    pub fn is_closed(&self) -> bool {
        self.confirm == "1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_candle_from_backend_json() {
        let json = r#"{
            "symbol": "ETH-USDT",
            "timestamp": "2024-05-01T09:30:00Z",
            "interval": "1m",
            "open": 3010.5,
            "high": 3012.0,
            "low": 3008.25,
            "close": 3011.75,
            "volume": 152.4,
            "confirm": "1",
            "created_at": "2024-05-01T09:31:02Z"
        }"#;

        let candle: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(candle.symbol, "ETH-USDT");
        assert_eq!(candle.close, dec!(3011.75));
        assert!(candle.is_closed());
    }

    #[test]
    fn test_open_candle_not_closed() {
        let json = r#"{
            "symbol": "ETH-USDT",
            "timestamp": "2024-05-01T09:31:00Z",
            "interval": "1m",
            "open": 3011.75,
            "high": 3011.75,
            "low": 3011.0,
            "close": 3011.2,
            "volume": 12.9,
            "confirm": "0"
        }"#;

        let candle: Candle = serde_json::from_str(json).unwrap();
        assert!(!candle.is_closed());
        assert_eq!(candle.created_at, None);
    }
}
