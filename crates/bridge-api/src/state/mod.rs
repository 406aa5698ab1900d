//! Application state
//!
//! Shared with every status handler.

use std::sync::Arc;

use bridge_gateway::BridgeRuntime;

#[derive(Clone)]
pub struct AppState {
    runtime: Arc<BridgeRuntime>,
}

impl AppState {
    pub fn new(runtime: Arc<BridgeRuntime>) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &BridgeRuntime {
        &self.runtime
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("servers", &self.runtime.len())
            .finish()
    }
}
