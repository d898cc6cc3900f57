//! WebSocket connection manager.
//!
//! Opens the multiplexed ticker connection and pumps frames into a
//! lifecycle event channel. There is deliberately no retry loop here: the
//! observed feed contract treats error and close as terminal, and callers
//! wanting recovery wrap `connect()` themselves.

use crate::config::ConnectionConfig;
use crate::error::{WsError, WsResult};
use crate::event::WsEvent;
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async_tls_with_config, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// WebSocket connection manager.
pub struct ConnectionManager {
    config: ConnectionConfig,
    state: Arc<RwLock<ConnectionState>>,
    event_tx: mpsc::Sender<WsEvent>,
    shutdown_token: CancellationToken,
}

impl ConnectionManager {
    /// Create a new connection manager.
    pub fn new(config: ConnectionConfig, event_tx: mpsc::Sender<WsEvent>) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            event_tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Get current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Signal graceful shutdown.
    pub fn shutdown(&self) {
        info!("ConnectionManager shutdown requested");
        self.shutdown_token.cancel();
    }

    /// Check if shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    /// Connect to the feed and run the message loop until the connection
    /// ends or shutdown is requested.
    ///
    /// Every lifecycle observation (open, frames, error, close) is
    /// forwarded on the event channel before this returns.
    pub async fn connect(&self) -> WsResult<()> {
        let url = self.config.feed_url();
        *self.state.write() = ConnectionState::Connecting;
        info!(url = %url, "Connecting to ticker feed");

        // TCP_NODELAY for lower latency on small ticker frames
        let (ws_stream, _response) = match connect_async_tls_with_config(&url, None, true, None)
            .await
        {
            Ok(ok) => ok,
            Err(e) => {
                *self.state.write() = ConnectionState::Disconnected;
                self.emit(WsEvent::Error(e.to_string())).await?;
                return Err(e.into());
            }
        };
        let (mut write, mut read) = ws_stream.split();

        *self.state.write() = ConnectionState::Connected;
        info!("Ticker feed connected");
        self.emit(WsEvent::Open).await?;

        loop {
            tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown signal received in message loop");
                    if let Err(e) = write.send(Message::Close(None)).await {
                        warn!(?e, "Failed to send Close frame during shutdown");
                    }
                    *self.state.write() = ConnectionState::Disconnected;
                    return Ok(());
                }

                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_text_frame(&text).await?;
                        }
                        Some(Ok(Message::Ping(data))) => {
                            debug!("Received ping, sending pong");
                            write.send(Message::Pong(data)).await?;
                        }
                        Some(Ok(Message::Pong(_))) => {
                            debug!("Received pong");
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let (code, reason) = frame
                                .map(|f| (f.code.into(), f.reason.to_string()))
                                .unwrap_or((1000, "Normal close".to_string()));
                            warn!(code, %reason, "Feed closed by server");
                            *self.state.write() = ConnectionState::Disconnected;
                            self.emit(WsEvent::Closed { code, reason }).await?;
                            return Ok(());
                        }
                        Some(Err(e)) => {
                            error!(?e, "WebSocket read error");
                            *self.state.write() = ConnectionState::Disconnected;
                            self.emit(WsEvent::Error(e.to_string())).await?;
                            return Err(e.into());
                        }
                        None => {
                            warn!("WebSocket stream ended");
                            *self.state.write() = ConnectionState::Disconnected;
                            self.emit(WsEvent::Closed {
                                code: 1006,
                                reason: "Stream ended".to_string(),
                            })
                            .await?;
                            return Ok(());
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    async fn handle_text_frame(&self, text: &str) -> WsResult<()> {
        // Frame shape is owned by the feed; anything non-JSON is dropped
        // here, anything JSON-but-unexpected is dropped by the parser.
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => self.emit(WsEvent::Message(value)).await,
            Err(e) => {
                debug!(%e, "Ignoring non-JSON frame");
                Ok(())
            }
        }
    }

    async fn emit(&self, event: WsEvent) -> WsResult<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| WsError::ReceiverDropped)
    }
}
