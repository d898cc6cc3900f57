//! Per-currency rate cache.
//!
//! One record per supported currency, created unset at startup and
//! replaced wholesale on each inbound ticker. The cache is owned by the
//! session task, which is the single writer; every message is applied in
//! delivery order, none coalesced.

use crate::parser::TickerEvent;
use chrono::{DateTime, Utc};
use ratewatch_core::{Currency, Rate};
use std::collections::HashMap;
use tracing::debug;

/// Cached market data for one currency.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRecord {
    /// Latest known conversion rate; `None` until the first ticker.
    pub rate: Option<Rate>,
    /// Last trade price, verbatim display string from the feed.
    pub last: Option<String>,
    /// Session high, verbatim display string.
    pub high: Option<String>,
    /// Session low, verbatim display string.
    pub low: Option<String>,
    /// Traded volume, verbatim display string.
    pub volume: Option<String>,
    /// When the record was last replaced.
    pub updated_at: Option<DateTime<Utc>>,
}

impl CurrencyRecord {
    /// Whether a usable rate has arrived for this currency.
    pub fn has_rate(&self) -> bool {
        self.rate.is_some()
    }
}

/// Keyed store of per-currency market data.
///
/// Keys are fixed at construction to the full supported set; records are
/// mutated in place for the lifetime of the process and never removed.
#[derive(Debug)]
pub struct RateCache {
    records: HashMap<Currency, CurrencyRecord>,
}

impl RateCache {
    /// Create the cache with every supported currency unset.
    pub fn new() -> Self {
        let records = Currency::ALL
            .iter()
            .map(|&c| (c, CurrencyRecord::default()))
            .collect();
        Self { records }
    }

    /// Apply one ticker update, replacing the whole record.
    ///
    /// Returns the previous rate so the caller can classify the change.
    /// Fields from earlier messages are never mixed into the new record.
    pub fn apply(&mut self, event: &TickerEvent) -> Option<Rate> {
        let record = self
            .records
            .get_mut(&event.currency)
            .expect("cache keys cover the full currency set");

        let previous = record.rate;
        *record = CurrencyRecord {
            rate: Some(event.rate),
            last: event.last.clone(),
            high: event.high.clone(),
            low: event.low.clone(),
            volume: event.volume.clone(),
            updated_at: Some(Utc::now()),
        };

        debug!(currency = %event.currency, rate = %event.rate, "Cache updated");
        previous
    }

    /// Get the record for a currency. The rate may still be unset.
    pub fn record(&self, currency: Currency) -> &CurrencyRecord {
        self.records
            .get(&currency)
            .expect("cache keys cover the full currency set")
    }

    /// Latest rate for a currency, if one has arrived.
    pub fn rate(&self, currency: Currency) -> Option<Rate> {
        self.record(currency).rate
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}
