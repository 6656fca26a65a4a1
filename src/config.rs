// SPDX-License-Identifier: MIT

//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Seconds before token expiry at which a proactive refresh is scheduled.
pub const DEFAULT_REFRESH_SKEW_SECS: i64 = 2 * 60;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the storefront API (no trailing slash)
    pub api_base_url: String,
    /// Directory for durable local state (session, cart, saved addresses)
    pub data_dir: PathBuf,
    /// Margin before token expiry at which a proactive refresh fires
    pub refresh_skew_secs: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file when present. Only `TITAN_API_URL` is required;
    /// the data directory defaults to the platform data dir.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("TITAN_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("TITAN_API_URL"))?,
            data_dir: env::var("TITAN_DATA_DIR").map(PathBuf::from).unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("titan-parts")
            }),
            refresh_skew_secs: env::var("TITAN_REFRESH_SKEW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REFRESH_SKEW_SECS),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            data_dir: std::env::temp_dir().join("titan-parts-test"),
            refresh_skew_secs: DEFAULT_REFRESH_SKEW_SECS,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
