//! WebSocket transport for the ratewatch ticker feed.
//!
//! Provides a single-connection client for the multiplexed ticker channel:
//! - the full currency list is encoded into the connection URL; the remote
//!   protocol has no post-connect subscribe calls
//! - open/message/error/close lifecycle is surfaced as a `WsEvent` stream
//! - no reconnection policy: a `connect()` call makes one attempt and the
//!   caller observes the outcome

pub mod config;
pub mod connection;
pub mod error;
pub mod event;

pub use config::ConnectionConfig;
pub use connection::{ConnectionManager, ConnectionState};
pub use error::{WsError, WsResult};
pub use event::WsEvent;

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any WebSocket connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
