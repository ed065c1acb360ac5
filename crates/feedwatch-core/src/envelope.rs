//! Response envelope shared by every backend endpoint.

use serde::{Deserialize, Serialize};

/// The `{success, data, error, timestamp}` wrapper around all API
/// responses.
///
/// Transport success does not imply application success: callers must
/// check `success` (or go through [`ApiResponse::into_data`]) before
/// trusting `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Application-level success flag.
    pub success: bool,
    /// Payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message, present on application-level failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server-side timestamp (ISO-8601).
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// The payload, but only when the envelope reports success.
    ///
    /// A `success=false` envelope or a missing payload yields `None`
    /// regardless of what `data` contains.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}
