//! Connection state and reconnection history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// WebSocket connection status as reported by the backend.
///
/// Serialized as the uppercase strings the backend emits
/// (`"CONNECTED"`, `"RECONNECTING"`, ...). Unknown strings are a
/// deserialization error, not a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
    Connecting,
    Reconnecting,
    Error,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected => write!(f, "CONNECTED"),
            Self::Disconnected => write!(f, "DISCONNECTED"),
            Self::Connecting => write!(f, "CONNECTING"),
            Self::Reconnecting => write!(f, "RECONNECTING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Snapshot of the backend's WebSocket connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    /// Current connection status.
    pub status: ConnectionStatus,
    /// Upstream WebSocket URL.
    pub url: String,
    /// When the current connection was established.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<DateTime<Utc>>,
    /// When the connection was last lost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disconnected_at: Option<DateTime<Utc>>,
    /// When the last message was received from upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_time: Option<DateTime<Utc>>,
    /// Reconnection attempts since the last successful connect.
    pub reconnect_attempts: u32,
    /// Current reconnect backoff delay in milliseconds, if backing off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_reconnect_delay: Option<u64>,
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            url: String::new(),
            connected_at: None,
            disconnected_at: None,
            last_message_time: None,
            reconnect_attempts: 0,
            current_reconnect_delay: None,
        }
    }
}

/// One entry in the backend's reconnection history.
///
/// Immutable once created by the backend; the client only reads ordered
/// lists of these (newest first by convention, not enforced here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconnectionRecord {
    /// Backend-issued unique id.
    pub id: String,
    /// When the reconnection attempt happened.
    pub timestamp: DateTime<Utc>,
    /// Trigger reason (e.g. "transport-error", "heartbeat-timeout").
    pub reason: String,
    /// Attempt sequence number.
    pub attempt: u32,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Reconnect duration in milliseconds (successful attempts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// Error message (failed attempts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate statistics over the reconnection history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconnectionStats {
    /// Total records retained by the backend.
    pub total_records: u32,
    /// Records in the recent window the stats were computed over.
    pub recent_count: u32,
    /// Successful attempts in the recent window.
    pub success_count: u32,
    /// Failed attempts in the recent window.
    pub failure_count: u32,
}

impl ReconnectionStats {
    /// Success ratio over the recent window, `None` when empty.
    pub fn success_rate(&self) -> Option<f64> {
        if self.recent_count == 0 {
            return None;
        }
        Some(f64::from(self.success_count) / f64::from(self.recent_count))
    }
}
