//! Application configuration.

use crate::error::{AppError, AppResult};
use feedwatch_api::ApiConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FEEDWATCH_CONFIG";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "FEEDWATCH_API_URL";

/// Default config file path.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Auto-refresh configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Polling interval in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// `limit` for reconnection history fetches.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
    /// `limit` for candle fetches.
    #[serde(default = "default_candle_limit")]
    pub candle_limit: u32,
}

fn default_interval_ms() -> u64 {
    5_000
}

fn default_history_limit() -> u32 {
    50
}

fn default_candle_limit() -> u32 {
    300
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            history_limit: default_history_limit(),
            candle_limit: default_candle_limit(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl AppConfig {
    /// Resolve and load configuration.
    ///
    /// Path precedence: CLI argument, then `FEEDWATCH_CONFIG`, then
    /// `config/default.toml`. An explicitly named file must exist; the
    /// default path is optional and falls back to built-in defaults.
    /// `FEEDWATCH_API_URL` overrides the backend base URL last.
    pub fn load(cli_path: Option<&str>) -> AppResult<Self> {
        let explicit = cli_path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_ENV).ok());

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api.base_url = url;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
