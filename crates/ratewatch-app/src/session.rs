//! Conversion session.
//!
//! The session is the explicit context object owning all mutable state:
//! rate cache, current selection, raw inputs, readiness, and the one-time
//! controls reveal. It is driven from a single task, so feed and user
//! events are serialized and no locking is needed.

use crate::config::AppConfig;
use crate::engine::{ConversionEngine, ConversionMode};
use crate::readiness::Readiness;
use ratewatch_core::{Currency, RateChange};
use ratewatch_feed::{RateCache, TickerEvent, TickerParser};
use ratewatch_ws::WsEvent;
use tracing::{debug, info, warn};

/// An event from the presentation layer.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// Raw text of the reference-asset input field changed.
    ReferenceInput(String),
    /// Raw text of the target-currency input field changed.
    TargetInput(String),
    /// The user selected a different currency.
    CurrencySelected(Currency),
}

/// Presentation output: everything the rendering layer needs, formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Converted total derived from the reference input.
    pub reference_output: String,
    /// Converted total derived from the target input; absent in
    /// one-directional mode.
    pub target_output: Option<String>,
    /// Selected currency code.
    pub currency: Currency,
    /// Formatted exchange rate for the selected currency.
    pub exchange_rate: String,
    /// Transient emphasis cue; `None` means no cue, `Unchanged` means
    /// clear any prior cue.
    pub rate_change: Option<RateChange>,
    /// Market display fields, copied verbatim (one-directional mode).
    pub last: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub volume: Option<String>,
    /// Status-bar text.
    pub status_text: &'static str,
    /// Current readiness value.
    pub readiness: Readiness,
    /// Whether the primary controls have been revealed.
    pub controls_visible: bool,
}

/// Streaming conversion session.
pub struct Session {
    engine: ConversionEngine,
    parser: TickerParser,
    cache: RateCache,
    selection: Currency,
    reference_input: String,
    target_input: String,
    readiness: Readiness,
    /// Reveal happens once per session, no matter how often Ready is
    /// re-entered.
    controls_revealed: bool,
    emphasis: Option<RateChange>,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            engine: ConversionEngine::new(config.mode, config.display_precision),
            parser: TickerParser::new(),
            cache: RateCache::new(),
            selection: config.default_currency,
            reference_input: String::new(),
            target_input: String::new(),
            readiness: Readiness::default(),
            controls_revealed: false,
            emphasis: None,
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn selection(&self) -> Currency {
        self.selection
    }

    /// Note that the connection attempt is starting and render the
    /// initial view.
    pub fn on_connect_start(&mut self) -> ViewState {
        self.readiness = self.readiness.on_connect_start();
        self.render()
    }

    /// Handle one feed lifecycle event.
    ///
    /// Returns a fresh view only when displayed output may have changed:
    /// tickers for non-selected currencies are stored but emit nothing,
    /// and error/close are observed but deliberately inert.
    pub fn handle_ws_event(&mut self, event: WsEvent) -> Option<ViewState> {
        match event {
            WsEvent::Open => {
                self.readiness = self.readiness.on_feed_open();
                Some(self.render())
            }
            WsEvent::Message(frame) => match self.parser.parse(&frame) {
                Ok(Some(ticker)) => self.on_ticker(ticker),
                Ok(None) => None,
                Err(e) => {
                    warn!(%e, "Dropping malformed ticker");
                    None
                }
            },
            WsEvent::Error(e) => {
                // Observed but inert: no readiness transition, no retry.
                warn!(error = %e, "Feed error");
                None
            }
            WsEvent::Closed { code, reason } => {
                warn!(code, %reason, "Feed closed");
                None
            }
        }
    }

    /// Handle one event from the presentation layer.
    pub fn handle_user_event(&mut self, event: UserEvent) -> ViewState {
        match event {
            UserEvent::ReferenceInput(text) => {
                self.reference_input = text;
            }
            UserEvent::TargetInput(text) => {
                self.target_input = text;
            }
            UserEvent::CurrencySelected(currency) => {
                self.on_currency_changed(currency);
            }
        }
        self.render()
    }

    fn on_ticker(&mut self, ticker: TickerEvent) -> Option<ViewState> {
        // Always stored, even when the user has switched away; only the
        // reactive recompute is limited to the current selection.
        let previous = self.cache.apply(&ticker);

        if ticker.currency != self.selection {
            return None;
        }

        // Classification needs a previous defined rate; the first update
        // for a currency carries no emphasis at all.
        self.emphasis = previous.map(|prev| RateChange::classify(prev, ticker.rate));

        if !self.readiness.is_ready() {
            self.readiness = self.readiness.on_rate_arrival();
            self.reveal_controls();
            info!(currency = %self.selection, "First rate for selection, view ready");
        }

        Some(self.render())
    }

    fn on_currency_changed(&mut self, currency: Currency) {
        debug!(from = %self.selection, to = %currency, "Selection changed");
        self.selection = currency;
        self.emphasis = None;

        let has_rate = self.cache.record(currency).has_rate();
        self.readiness = self.readiness.on_selection_change(has_rate);
        if self.readiness.is_ready() {
            self.reveal_controls();
        }
    }

    fn reveal_controls(&mut self) {
        if !self.controls_revealed {
            self.controls_revealed = true;
        }
    }

    fn render(&self) -> ViewState {
        let record = self.cache.record(self.selection);
        let rate = record.rate;

        let reference_output = self
            .engine
            .format(self.engine.convert(&self.reference_input, rate));

        let (target_output, last, high, low, volume) = match self.engine.mode() {
            ConversionMode::Bidirectional => {
                let out = self
                    .engine
                    .format(self.engine.convert_inverse(&self.target_input, rate));
                (Some(out), None, None, None, None)
            }
            ConversionMode::OneDirectional => (
                None,
                record.last.clone(),
                record.high.clone(),
                record.low.clone(),
                record.volume.clone(),
            ),
        };

        ViewState {
            reference_output,
            target_output,
            currency: self.selection,
            exchange_rate: self.engine.format_rate(rate),
            rate_change: self.emphasis,
            last,
            high,
            low,
            volume,
            status_text: self.readiness.status_text(),
            readiness: self.readiness,
            controls_visible: self.controls_revealed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> AppConfig {
        AppConfig {
            default_currency: Currency::Usd,
            ..Default::default()
        }
    }

    fn ticker_frame(currency: &str, avg: &str) -> WsEvent {
        WsEvent::Message(json!({
            "ticker": {
                "buy": {"currency": currency},
                "avg": {"value": avg},
                "last": {"display": "$30,010.00"},
                "high": {"display": "$31,000.00"},
                "low": {"display": "$29,500.00"},
                "vol": {"display": "8,200 BTC"}
            }
        }))
    }

    #[test]
    fn test_open_transitions_to_connected() {
        let mut session = Session::new(&config());
        let view = session.on_connect_start();
        assert_eq!(view.readiness, Readiness::Connecting);

        let view = session.handle_ws_event(WsEvent::Open).unwrap();
        assert_eq!(view.readiness, Readiness::Connected);
        assert!(!view.controls_visible);
    }

    #[test]
    fn test_first_selected_rate_reaches_ready() {
        let mut session = Session::new(&config());
        session.on_connect_start();
        session.handle_ws_event(WsEvent::Open);

        let view = session
            .handle_ws_event(ticker_frame("USD", "30000"))
            .unwrap();
        assert_eq!(view.readiness, Readiness::Ready);
        assert!(view.controls_visible);
        assert_eq!(view.exchange_rate, "30000.000");
        // First update ever: no emphasis.
        assert!(view.rate_change.is_none());
    }

    #[test]
    fn test_non_selected_ticker_emits_nothing() {
        let mut session = Session::new(&config());
        session.on_connect_start();
        session.handle_ws_event(WsEvent::Open);

        assert!(session.handle_ws_event(ticker_frame("EUR", "25000")).is_none());
        // Stored nonetheless: switching to EUR is immediately ready.
        let view = session.handle_user_event(UserEvent::CurrencySelected(Currency::Eur));
        assert_eq!(view.exchange_rate, "25000.000");
    }

    #[test]
    fn test_switch_to_unset_currency_forces_loading() {
        let mut session = Session::new(&config());
        session.on_connect_start();
        session.handle_ws_event(WsEvent::Open);
        session.handle_ws_event(ticker_frame("USD", "30000"));
        session.handle_user_event(UserEvent::ReferenceInput("2".to_string()));

        let view = session.handle_user_event(UserEvent::CurrencySelected(Currency::Jpy));
        assert_eq!(view.readiness, Readiness::Loading);
        assert_eq!(view.reference_output, "N/A");
        assert_eq!(view.exchange_rate, "N/A");
        // Ready was already reached once; the reveal does not retract.
        assert!(view.controls_visible);
    }

    #[test]
    fn test_emphasis_follows_classification() {
        let mut session = Session::new(&config());
        session.on_connect_start();
        session.handle_ws_event(WsEvent::Open);
        session.handle_ws_event(ticker_frame("USD", "30000"));

        let view = session
            .handle_ws_event(ticker_frame("USD", "30500"))
            .unwrap();
        assert_eq!(view.rate_change, Some(RateChange::Increase));

        let view = session
            .handle_ws_event(ticker_frame("USD", "30500"))
            .unwrap();
        assert_eq!(view.rate_change, Some(RateChange::Unchanged));
    }

    #[test]
    fn test_selection_change_clears_emphasis() {
        let mut session = Session::new(&config());
        session.handle_ws_event(ticker_frame("USD", "30000"));
        session.handle_ws_event(ticker_frame("USD", "30500"));
        session.handle_ws_event(ticker_frame("EUR", "25000"));

        let view = session.handle_user_event(UserEvent::CurrencySelected(Currency::Eur));
        assert!(view.rate_change.is_none());
    }

    #[test]
    fn test_feed_error_and_close_are_inert() {
        let mut session = Session::new(&config());
        session.on_connect_start();
        session.handle_ws_event(WsEvent::Open);
        session.handle_ws_event(ticker_frame("USD", "30000"));

        assert!(session
            .handle_ws_event(WsEvent::Error("broken pipe".to_string()))
            .is_none());
        assert!(session
            .handle_ws_event(WsEvent::Closed {
                code: 1006,
                reason: "gone".to_string()
            })
            .is_none());
        // Sticky ready.
        assert!(session.readiness().is_ready());
    }

    #[test]
    fn test_one_directional_mode_surfaces_market_fields() {
        let cfg = AppConfig {
            mode: ConversionMode::OneDirectional,
            ..config()
        };
        let mut session = Session::new(&cfg);
        let view = session
            .handle_ws_event(ticker_frame("USD", "30000"))
            .unwrap();

        assert!(view.target_output.is_none());
        assert_eq!(view.last.as_deref(), Some("$30,010.00"));
        assert_eq!(view.high.as_deref(), Some("$31,000.00"));
        assert_eq!(view.volume.as_deref(), Some("8,200 BTC"));
    }

    #[test]
    fn test_malformed_ticker_dropped_silently() {
        let mut session = Session::new(&config());
        let frame = WsEvent::Message(json!({
            "ticker": {"buy": {"currency": "USD"}, "avg": {"value": "bogus"}}
        }));
        assert!(session.handle_ws_event(frame).is_none());
        assert!(session.cache_rate_unset_for_test(Currency::Usd));
    }

    impl Session {
        fn cache_rate_unset_for_test(&self, currency: Currency) -> bool {
            !self.cache.record(currency).has_rate()
        }
    }
}
