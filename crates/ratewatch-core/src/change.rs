//! Rate-change classification.
//!
//! Compares a previous and a new rate for the selected currency. The
//! result drives transient visual emphasis in the presentation layer and
//! persists no state of its own.

use crate::decimal::Rate;
use std::fmt;

/// Direction of a rate change between two consecutive updates.
///
/// Classification is only meaningful once a previous defined rate exists;
/// the first update for a currency is never classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateChange {
    Increase,
    Decrease,
    Unchanged,
}

impl RateChange {
    /// Classify the transition from `previous` to `new`.
    pub fn classify(previous: Rate, new: Rate) -> Self {
        if new > previous {
            Self::Increase
        } else if new < previous {
            Self::Decrease
        } else {
            Self::Unchanged
        }
    }

    /// Whether the presentation layer should clear any prior emphasis.
    pub fn clears_emphasis(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl fmt::Display for RateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase => write!(f, "increase"),
            Self::Decrease => write!(f, "decrease"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}
