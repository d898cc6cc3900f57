//! Conversion engine.
//!
//! Pure numeric mapping from user inputs and the cached rate to display
//! values. "Insufficient data" is an ordinary result here, never a fault:
//! an unset rate, unparsable input, and an unusable divisor all render as
//! the same `N/A` sentinel.

use ratewatch_core::{Amount, Rate};
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

/// Rendered output for values that cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Calculation mode.
///
/// Both modes are configuration choices of the one engine, not separate
/// engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Reference→target and target→reference, each derived from its own
    /// input field.
    #[default]
    Bidirectional,
    /// Reference→target only; market display fields are surfaced instead
    /// of the reverse conversion.
    OneDirectional,
}

/// Pure conversion and formatting component.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    mode: ConversionMode,
    /// Decimal places for display purposes only; stored rates keep their
    /// full precision.
    display_precision: u32,
}

impl ConversionEngine {
    pub fn new(mode: ConversionMode, display_precision: u32) -> Self {
        Self {
            mode,
            display_precision,
        }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    /// Convert a raw reference-amount input to the target currency.
    ///
    /// `None` when the rate is unset or the input does not parse.
    pub fn convert(&self, input: &str, rate: Option<Rate>) -> Option<Amount> {
        let rate = rate?;
        let amount: Amount = input.trim().parse().ok()?;
        Some(amount * rate)
    }

    /// Convert a raw target-amount input back to the reference asset.
    ///
    /// `None` when the rate is unset or zero, or the input does not parse.
    pub fn convert_inverse(&self, input: &str, rate: Option<Rate>) -> Option<Amount> {
        let rate = rate?;
        if rate.is_zero() {
            return None;
        }
        let amount: Amount = input.trim().parse().ok()?;
        Some(amount / rate)
    }

    /// Format a converted amount for display.
    pub fn format(&self, value: Option<Amount>) -> String {
        match value {
            Some(amount) => self.format_decimal(amount.inner()),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Format an exchange rate for display.
    pub fn format_rate(&self, rate: Option<Rate>) -> String {
        match rate {
            Some(rate) => self.format_decimal(rate.inner()),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    fn format_decimal(&self, value: rust_decimal::Decimal) -> String {
        let rounded = value
            .round_dp_with_strategy(self.display_precision, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.prec$}", prec = self.display_precision as usize)
    }
}
