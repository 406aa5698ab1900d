//! Test fixtures
//!
//! Console frames, bridge configuration and a recording chat sink.

use std::sync::Arc;

use async_trait::async_trait;
use bridge_common::BridgeConfig;
use bridge_core::{ChatSink, ChatTarget, SinkError};
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::json;

pub const TEST_KEY: &str = "change_me";
pub const LOGIN_GROUP: i64 = 10_001;
pub const LEAVE_GROUP: i64 = 10_002;

pub const PLAYER_LIST_LOGGER: &str = "net.minecraft.server.players.PlayerList";
pub const PLAYER_CONNECTION_LOGGER: &str = "net.minecraft.server.network.PlayerConnection";

/// A console frame as the server streams it, `age_ms` in the past
pub fn console_frame(logger: &str, message: &str, age_ms: i64) -> String {
    json!({
        "timestampMillis": Utc::now().timestamp_millis() - age_ms,
        "loggerName": logger,
        "message": message,
        "level": "INFO",
    })
    .to_string()
}

pub fn chat_frame(player: &str, text: &str) -> String {
    console_frame("", &format!("<{player}> {text}"), 0)
}

pub fn login_frame(player: &str) -> String {
    console_frame(
        PLAYER_LIST_LOGGER,
        &format!("{player}[/127.0.0.1:51234] logged in with entity id 123 at (0.5, 64.0, 0.5)"),
        0,
    )
}

pub fn leave_frame(player: &str) -> String {
    console_frame(PLAYER_CONNECTION_LOGGER, &format!("{player} lost connection: Disconnected"), 0)
}

pub fn command_frame(player: &str, command: &str) -> String {
    console_frame("", &format!("{player} issued server command: /{command}"), 0)
}

/// Bridge configuration for one mock server with group notices enabled
pub fn bridge_config(endpoint: &str, key: &str) -> BridgeConfig {
    let toml = format!(
        r#"
        [status]
        enabled = false

        [[servers]]
        uri = "{endpoint}"
        auth_key = "{key}"

        [servers.behavior]
        join_event_qq_broadcast_group = [{LOGIN_GROUP}]
        leave_event_qq_broadcast_group = [{LEAVE_GROUP}]
        "#
    );

    BridgeConfig::from_toml_str(&toml).expect("valid test configuration")
}

/// Chat sink that keeps every message
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(ChatTarget, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(ChatTarget, String)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn send(&self, target: ChatTarget, message: &str) -> Result<(), SinkError> {
        self.sent.lock().push((target, message.to_string()));
        Ok(())
    }
}
