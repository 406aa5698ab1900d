//! OneBot v11 HTTP sink
//!
//! Posts `send_group_msg` / `send_private_msg` actions to the bot's HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use bridge_core::{ChatSink, ChatTarget, SinkError};

/// Chat sink backed by a OneBot v11 HTTP endpoint
#[derive(Debug, Clone)]
pub struct OneBotSink {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionReply {
    #[serde(default)]
    status: String,
    #[serde(default)]
    retcode: i64,
}

impl OneBotSink {
    /// Create a sink for `base_url`, e.g. `http://127.0.0.1:5700`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        base_url: impl Into<String>,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.filter(|t| !t.is_empty()),
        })
    }

    fn action(target: ChatTarget, message: &str) -> (&'static str, serde_json::Value) {
        match target {
            ChatTarget::Group(group_id) => (
                "send_group_msg",
                json!({ "group_id": group_id, "message": message }),
            ),
            ChatTarget::User(user_id) => (
                "send_private_msg",
                json!({ "user_id": user_id, "message": message }),
            ),
        }
    }
}

#[async_trait]
impl ChatSink for OneBotSink {
    async fn send(&self, target: ChatTarget, message: &str) -> Result<(), SinkError> {
        let (action, body) = Self::action(target, message);
        let delivery = |reason: String| SinkError::Delivery { target, reason };

        let mut request = self
            .http
            .post(format!("{}/{action}", self.base_url))
            .json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| delivery(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected {
                target,
                reason: format!("HTTP {status}"),
            });
        }

        let reply: ActionReply = response.json().await.map_err(|e| delivery(e.to_string()))?;
        if reply.retcode != 0 {
            return Err(SinkError::Rejected {
                target,
                reason: format!("status {} retcode {}", reply.status, reply.retcode),
            });
        }

        tracing::debug!(%target, action, "Chat message delivered");
        Ok(())
    }
}
