//! Ticker parsing and rate cache for ratewatch.
//!
//! Translates raw feed frames into typed `TickerEvent`s and maintains the
//! per-currency `RateCache` that drives the conversion view.

pub mod cache;
pub mod error;
pub mod parser;

pub use cache::{CurrencyRecord, RateCache};
pub use error::{FeedError, FeedResult};
pub use parser::{TickerEvent, TickerParser};
