//! Behavior context - shared dependencies of every behavior listener

use std::collections::HashMap;
use std::sync::Arc;

use bridge_common::{BridgeConfig, ServerBehavior};
use bridge_core::ChatSink;

/// Per-server behavior configuration plus the chat platform sink
pub struct BehaviorContext {
    behaviors: HashMap<String, ServerBehavior>,
    sink: Arc<dyn ChatSink>,
}

impl BehaviorContext {
    /// Create a context from behaviors keyed by server endpoint
    pub fn new(behaviors: HashMap<String, ServerBehavior>, sink: Arc<dyn ChatSink>) -> Self {
        Self { behaviors, sink }
    }

    /// Collect the behavior section of every configured server
    pub fn from_config(config: &BridgeConfig, sink: Arc<dyn ChatSink>) -> Self {
        let behaviors = config
            .servers
            .iter()
            .map(|entry| (entry.uri.clone(), entry.behavior.clone()))
            .collect();
        Self::new(behaviors, sink)
    }

    /// Behavior configured for the server at `endpoint`
    pub fn behavior_for(&self, endpoint: &str) -> Option<&ServerBehavior> {
        self.behaviors.get(endpoint)
    }

    pub fn sink(&self) -> &dyn ChatSink {
        self.sink.as_ref()
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl std::fmt::Debug for BehaviorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorContext")
            .field("servers", &self.behaviors.keys().collect::<Vec<_>>())
            .field("sink", &"ChatSink")
            .finish()
    }
}
