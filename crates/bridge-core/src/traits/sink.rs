//! Chat sink - outbound messages to the chat platform

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recipient on the chat platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum ChatTarget {
    Group(i64),
    User(i64),
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(id) => write!(f, "group:{id}"),
            Self::User(id) => write!(f, "user:{id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Delivery to {target} failed: {reason}")]
    Delivery { target: ChatTarget, reason: String },

    #[error("Chat platform rejected message to {target}: {reason}")]
    Rejected { target: ChatTarget, reason: String },
}

#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Send a text message to one recipient
    async fn send(&self, target: ChatTarget, message: &str) -> Result<(), SinkError>;
}
