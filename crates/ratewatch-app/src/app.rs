//! Main application orchestration.
//!
//! Wires the transport, the session, and the presentation channels into
//! one event loop. Feed events and user events are serialized through a
//! single `select!`, which is what preserves the single-writer guarantee
//! over the cache and the selection.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::session::{Session, UserEvent, ViewState};
use ratewatch_ws::{ConnectionManager, WsEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

/// Main application.
pub struct Application {
    config: AppConfig,
    session: Session,
    view_tx: watch::Sender<ViewState>,
}

impl Application {
    /// Create a new application.
    pub fn new(config: AppConfig) -> Self {
        let mut session = Session::new(&config);
        let initial = session.on_connect_start();
        let (view_tx, _view_rx) = watch::channel(initial);

        Self {
            config,
            session,
            view_tx,
        }
    }

    /// Subscribe to view updates.
    ///
    /// Every recompute publishes a fresh `ViewState` here; the rendering
    /// layer consumes the latest value.
    pub fn subscribe_view(&self) -> watch::Receiver<ViewState> {
        self.view_tx.subscribe()
    }

    /// Run the application until the user channel closes or Ctrl-C.
    pub async fn run(mut self, mut user_rx: mpsc::Receiver<UserEvent>) -> AppResult<()> {
        info!(currency = %self.session.selection(), mode = ?self.config.mode, "Starting application");

        let (event_tx, mut event_rx) = mpsc::channel::<WsEvent>(self.config.channel_buffer);
        let manager = Arc::new(ConnectionManager::new(
            self.config.connection_config(),
            event_tx,
        ));

        let manager_clone = manager.clone();
        let ws_handle = tokio::spawn(async move {
            if let Err(e) = manager_clone.connect().await {
                error!(?e, "Ticker feed connection failed");
            }
        });

        // Once the feed ends (error or close, both inert by contract) the
        // view keeps serving cached data for user events.
        let mut feed_open = true;

        loop {
            tokio::select! {
                event = event_rx.recv(), if feed_open => {
                    match event {
                        Some(event) => {
                            if let Some(view) = self.session.handle_ws_event(event) {
                                self.publish(view);
                            }
                        }
                        None => {
                            warn!("Feed event stream ended");
                            feed_open = false;
                        }
                    }
                }

                user = user_rx.recv() => {
                    match user {
                        Some(event) => {
                            let view = self.session.handle_user_event(event);
                            self.publish(view);
                        }
                        None => {
                            info!("User event stream closed, shutting down");
                            break;
                        }
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        manager.shutdown();
        ws_handle.abort();

        Ok(())
    }

    fn publish(&self, view: ViewState) {
        info!(
            currency = %view.currency,
            rate = %view.exchange_rate,
            reference = %view.reference_output,
            target = view.target_output.as_deref().unwrap_or("-"),
            change = view.rate_change.map(|c| c.to_string()).unwrap_or_default(),
            readiness = %view.readiness,
            "View updated"
        );
        self.view_tx.send_replace(view);
    }
}
