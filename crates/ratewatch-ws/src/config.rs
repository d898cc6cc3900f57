//! Connection configuration.

use ratewatch_core::Currency;

/// Connection configuration for the multiplexed ticker feed.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base WebSocket URL, without subscription parameters.
    pub url: String,
    /// Channel name requested from the feed.
    pub channel: String,
}

impl ConnectionConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Full connection target with the fixed currency list encoded.
    ///
    /// The feed requires every currency channel to be named at connection
    /// time; there is no per-currency subscribe afterwards.
    pub fn feed_url(&self) -> String {
        format!(
            "{}?Channel={}&Currency={}",
            self.url,
            self.channel,
            Currency::subscription_list()
        )
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            channel: "ticker".to_string(),
        }
    }
}
