//! Application readiness state machine.
//!
//! Tracks whether enough data exists to show a meaningful converted value
//! for the selected currency. Driven by feed lifecycle events and by the
//! arrival of the first usable rate; feed error and close are observed
//! upstream but cause no transition here.

use std::fmt;

/// Readiness of the conversion view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    /// No usable rate for the selected currency yet.
    #[default]
    Loading,
    /// Connection attempt in progress.
    Connecting,
    /// Feed open, waiting for the first ticker of the selected currency.
    Connected,
    /// Rate available; outputs update in real time.
    Ready,
}

impl Readiness {
    /// A connection attempt begins.
    pub fn on_connect_start(self) -> Self {
        match self {
            Self::Loading => Self::Connecting,
            s => s,
        }
    }

    /// The feed signals open.
    pub fn on_feed_open(self) -> Self {
        match self {
            Self::Connecting => Self::Connected,
            s => s,
        }
    }

    /// The first usable rate for the selected currency arrives.
    ///
    /// Ready is sticky: once reached, further rate updates keep it.
    pub fn on_rate_arrival(self) -> Self {
        Self::Ready
    }

    /// The user switches selection; `has_rate` says whether the new
    /// currency's cached rate is set.
    ///
    /// Switching to an unset currency drops to Loading from any state.
    /// Switching to a set currency only promotes Loading to Ready; it
    /// never touches the connection-phase states.
    pub fn on_selection_change(self, has_rate: bool) -> Self {
        if !has_rate {
            Self::Loading
        } else if self == Self::Loading {
            Self::Ready
        } else {
            self
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Status-bar text for the presentation layer.
    pub fn status_text(&self) -> &'static str {
        match self {
            Self::Connecting => "Connecting to ticker feed...",
            Self::Connected => "Connection established, waiting for data...",
            Self::Loading => "No data for this currency received. Waiting...",
            Self::Ready => {
                "Application initialised. Exchange rate and converted totals \
                 are updated in real time."
            }
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "LOADING"),
            Self::Connecting => write!(f, "CONNECTING"),
            Self::Connected => write!(f, "CONNECTED"),
            Self::Ready => write!(f, "READY"),
        }
    }
}
