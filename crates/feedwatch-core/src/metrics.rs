//! Backend system metrics.

use serde::{Deserialize, Serialize};

/// Counters and gauges reported by the ingestion service.
///
/// Values are replaced wholesale on every fetch; there is no
/// client-side aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    /// Total messages received over the WebSocket.
    pub messages_received: u64,
    /// Current message throughput.
    pub messages_per_second: f64,
    /// Total bytes processed.
    pub data_processed: u64,
    /// Cache hit rate, backend-defined scale (0-1).
    pub cache_hit_rate: f64,
    /// Active MongoDB connections.
    pub mongodb_connections: u32,
    /// Active Redis connections.
    pub redis_connections: u32,
    /// Memory usage fraction.
    pub memory_usage: f64,
    /// CPU usage fraction.
    pub cpu_usage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_from_backend_json() {
        let json = r#"{
            "messagesReceived": 125000,
            "messagesPerSecond": 42.5,
            "dataProcessed": 73400320,
            "cacheHitRate": 0.92,
            "mongodbConnections": 8,
            "redisConnections": 4,
            "memoryUsage": 0.61,
            "cpuUsage": 0.23
        }"#;

        let metrics: SystemMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.messages_received, 125_000);
        assert_eq!(metrics.mongodb_connections, 8);
        assert!((metrics.cache_hit_rate - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_is_all_zero() {
        let metrics = SystemMetrics::default();
        assert_eq!(metrics.messages_received, 0);
        assert_eq!(metrics.messages_per_second, 0.0);
        assert_eq!(metrics.redis_connections, 0);
    }
}
