//! Core domain types for the ratewatch conversion engine.
//!
//! This crate provides fundamental types used throughout the system:
//! - `Currency`: the closed set of supported currency codes
//! - `Rate`, `Amount`: precision-safe numeric types
//! - `RateChange`: increase/decrease/unchanged classification

pub mod change;
pub mod currency;
pub mod decimal;
pub mod error;

pub use change::RateChange;
pub use currency::Currency;
pub use decimal::{Amount, Rate};
pub use error::{CoreError, Result};
