//! Sink used when no chat platform is configured

use async_trait::async_trait;

use bridge_core::{ChatSink, ChatTarget, SinkError};

/// Writes outbound chat messages to the log instead of delivering them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl ChatSink for LogSink {
    async fn send(&self, target: ChatTarget, message: &str) -> Result<(), SinkError> {
        tracing::info!(%target, text = message, "Chat message (no chat platform configured)");
        Ok(())
    }
}
