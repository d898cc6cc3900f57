//! Ticker message parsing.
//!
//! Parses raw feed frames into typed `TickerEvent`s. One frame describes
//! one currency's update: a representative rate (the `avg` value) plus
//! opaque display strings for last/high/low/volume.
//!
//! Anything that does not match the expected shape is ignored rather than
//! trusted: frames without a ticker body and tickers naming a currency
//! outside the supported set yield `Ok(None)`; a recognizable ticker with
//! an unparsable rate is a parse error for the caller to log and drop.

use crate::error::{FeedError, FeedResult};
use ratewatch_core::{Currency, Rate};
use serde::Deserialize;
use tracing::debug;

/// Raw ticker frame from the feed.
#[derive(Debug, Deserialize)]
struct RawTicker {
    ticker: RawTickerData,
}

/// Ticker body. Every field the feed sends is a `{value, display,
/// currency}` triple; only the parts this core consumes are modeled.
#[derive(Debug, Deserialize)]
struct RawTickerData {
    #[serde(default)]
    buy: Option<RawField>,
    #[serde(default)]
    avg: Option<RawField>,
    #[serde(default)]
    last: Option<RawField>,
    #[serde(default)]
    high: Option<RawField>,
    #[serde(default)]
    low: Option<RawField>,
    #[serde(default)]
    vol: Option<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    display: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

/// Parsed ticker update for one currency.
///
/// Display fields are pre-formatted strings copied verbatim from the
/// feed; they are surfaced, never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerEvent {
    pub currency: Currency,
    pub rate: Rate,
    pub last: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub volume: Option<String>,
}

/// Ticker frame parser.
#[derive(Debug, Default)]
pub struct TickerParser;

impl TickerParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw frame into a ticker event.
    ///
    /// Returns `Ok(None)` for frames that are not tickers or that name a
    /// currency outside the supported set; both are dropped silently.
    pub fn parse(&self, frame: &serde_json::Value) -> FeedResult<Option<TickerEvent>> {
        if frame.get("ticker").is_none() {
            debug!("Frame without ticker body, ignoring");
            return Ok(None);
        }

        let raw: RawTicker = match serde_json::from_value(frame.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(%e, "Unexpected ticker shape, ignoring");
                return Ok(None);
            }
        };

        let Some(code) = raw.ticker.buy.as_ref().and_then(|f| f.currency.as_deref()) else {
            debug!("Ticker without currency code, ignoring");
            return Ok(None);
        };

        let currency: Currency = match code.parse() {
            Ok(c) => c,
            Err(_) => {
                // The fixed set matches the subscription list; anything
                // else is tolerated and dropped.
                debug!(code, "Ticker for unsupported currency, ignoring");
                return Ok(None);
            }
        };

        let rate_str = raw
            .ticker
            .avg
            .as_ref()
            .and_then(|f| f.value.as_deref())
            .ok_or_else(|| FeedError::Parse(format!("Ticker for {currency} has no avg value")))?;

        let rate: Rate = rate_str
            .parse()
            .map_err(|_| FeedError::Parse(format!("Invalid rate for {currency}: {rate_str}")))?;

        debug!(%currency, %rate, "Ticker update");
        Ok(Some(TickerEvent {
            currency,
            rate,
            last: raw.ticker.last.and_then(|f| f.display),
            high: raw.ticker.high.and_then(|f| f.display),
            low: raw.ticker.low.and_then(|f| f.display),
            volume: raw.ticker.vol.and_then(|f| f.display),
        }))
    }
}
