//! API client configuration.

use serde::{Deserialize, Serialize};

/// Backend API endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"base_url": "http://10.0.0.5:9090/api"}"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:9090/api");
        assert_eq!(config.timeout_ms, 10_000);
    }
}
