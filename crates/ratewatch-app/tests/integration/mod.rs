//! Integration tests for ratewatch-app.
//!
//! These tests verify the interaction between components:
//! - WebSocket connection lifecycle against a mock feed
//! - Ticker flow from the wire into the session and view

pub mod common;
