//! Feed lifecycle events.

/// One event from the transport, in delivery order.
///
/// The readiness machine consumes `Open`; `Error` and `Closed` are
/// observed but deliberately cause no state transition downstream.
#[derive(Debug, Clone)]
pub enum WsEvent {
    /// Connection established and subscription active.
    Open,
    /// One inbound frame, parsed to JSON. Shape is owned by the feed.
    Message(serde_json::Value),
    /// Transport-level error; the connection is gone after this.
    Error(String),
    /// Server closed the connection.
    Closed { code: u16, reason: String },
}
