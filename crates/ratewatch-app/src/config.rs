//! Application configuration.

use crate::engine::ConversionMode;
use crate::error::{AppError, AppResult};
use ratewatch_core::Currency;
use ratewatch_ws::ConnectionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// WebSocket endpoint URL (subscription parameters are appended).
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Calculation mode.
    #[serde(default)]
    pub mode: ConversionMode,
    /// Decimal places for display purposes. Default: 3.
    #[serde(default = "default_display_precision")]
    pub display_precision: u32,
    /// Currency selected at startup. Default: USD.
    #[serde(default = "default_currency")]
    pub default_currency: Currency,
    /// Feed event channel buffer. Sized to absorb ticker bursts without
    /// back-pressuring the transport.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,
}

fn default_ws_url() -> String {
    "wss://websocket.mtgox.com/mtgox".to_string()
}

fn default_display_precision() -> u32 {
    3
}

fn default_currency() -> Currency {
    Currency::Usd
}

fn default_channel_buffer() -> usize {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            mode: ConversionMode::default(),
            display_precision: default_display_precision(),
            default_currency: default_currency(),
            channel_buffer: default_channel_buffer(),
        }
    }
}

impl AppConfig {
    /// Load configuration, honoring the `RATEWATCH_CONFIG` env var and
    /// falling back to defaults when no file exists.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("RATEWATCH_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Transport configuration for the ticker connection.
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(self.ws_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.display_precision, 3);
        assert_eq!(config.default_currency, Currency::Usd);
        assert_eq!(config.mode, ConversionMode::Bidirectional);
        assert_eq!(config.channel_buffer, 1000);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: AppConfig = toml::from_str("ws_url = \"wss://example.com/feed\"").unwrap();
        assert_eq!(config.ws_url, "wss://example.com/feed");
        assert_eq!(config.display_precision, 3);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
            ws_url = "wss://example.com/feed"
            mode = "onedirectional"
            display_precision = 2
            default_currency = "EUR"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.mode, ConversionMode::OneDirectional);
        assert_eq!(config.display_precision, 2);
        assert_eq!(config.default_currency, Currency::Eur);
    }
}
