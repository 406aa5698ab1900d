//! Integration test utilities for the bridge
//!
//! Provides an in-process mock of the game server management API
//! (HTTP + console WebSocket), a recording chat sink and helpers for
//! driving the status API.

pub mod fixtures;
pub mod helpers;
pub mod mock_server;

pub use fixtures::*;
pub use helpers::*;
pub use mock_server::{MockCall, MockServer};
