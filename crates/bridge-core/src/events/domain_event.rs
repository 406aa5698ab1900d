//! Domain events - typed console events delivered to listeners
//!
//! Every event keeps the raw record it was built from, the server-side
//! timestamp and the resolved player identifier when one was found.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::ConsoleRecord;
use crate::events::{Classified, EventKind};

/// All console events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    PlayerChat(PlayerChatEvent),
    PlayerLogin(PlayerLoginEvent),
    PlayerDisconnect(PlayerDisconnectEvent),
    CommandIssued(CommandIssuedEvent),
}

impl DomainEvent {
    /// Build an event from a classified record and the resolved identifier
    pub fn from_classified(
        classified: Classified,
        record: ConsoleRecord,
        player_uuid: Option<String>,
    ) -> Self {
        let timestamp_millis = record.timestamp_millis;
        match classified {
            Classified::Login { player_name } => Self::PlayerLogin(PlayerLoginEvent {
                record,
                timestamp_millis,
                player_name,
                player_uuid,
            }),
            Classified::Disconnect { player_name } => {
                Self::PlayerDisconnect(PlayerDisconnectEvent {
                    record,
                    timestamp_millis,
                    player_name,
                    player_uuid,
                })
            }
            Classified::Chat {
                player_name,
                message,
            } => Self::PlayerChat(PlayerChatEvent {
                record,
                timestamp_millis,
                player_name,
                player_uuid,
                message,
            }),
            Classified::Command {
                player_name,
                command,
            } => Self::CommandIssued(CommandIssuedEvent {
                record,
                timestamp_millis,
                player_name,
                player_uuid,
                command,
            }),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::PlayerChat(_) => EventKind::PlayerChat,
            Self::PlayerLogin(_) => EventKind::PlayerLogin,
            Self::PlayerDisconnect(_) => EventKind::PlayerDisconnect,
            Self::CommandIssued(_) => EventKind::CommandIssued,
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// The console record this event was built from
    pub fn record(&self) -> &ConsoleRecord {
        match self {
            Self::PlayerChat(e) => &e.record,
            Self::PlayerLogin(e) => &e.record,
            Self::PlayerDisconnect(e) => &e.record,
            Self::CommandIssued(e) => &e.record,
        }
    }

    /// Server-side time in milliseconds since the Unix epoch
    pub fn timestamp_millis(&self) -> i64 {
        match self {
            Self::PlayerChat(e) => e.timestamp_millis,
            Self::PlayerLogin(e) => e.timestamp_millis,
            Self::PlayerDisconnect(e) => e.timestamp_millis,
            Self::CommandIssued(e) => e.timestamp_millis,
        }
    }

    /// Server-side time; falls back to the epoch for out-of-range values
    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp_millis()).unwrap_or_default()
    }

    pub fn player_name(&self) -> &str {
        match self {
            Self::PlayerChat(e) => &e.player_name,
            Self::PlayerLogin(e) => &e.player_name,
            Self::PlayerDisconnect(e) => &e.player_name,
            Self::CommandIssued(e) => &e.player_name,
        }
    }

    pub fn player_uuid(&self) -> Option<&str> {
        match self {
            Self::PlayerChat(e) => e.player_uuid.as_deref(),
            Self::PlayerLogin(e) => e.player_uuid.as_deref(),
            Self::PlayerDisconnect(e) => e.player_uuid.as_deref(),
            Self::CommandIssued(e) => e.player_uuid.as_deref(),
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerChatEvent {
    pub record: ConsoleRecord,
    pub timestamp_millis: i64,
    pub player_name: String,
    pub player_uuid: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerLoginEvent {
    pub record: ConsoleRecord,
    pub timestamp_millis: i64,
    pub player_name: String,
    pub player_uuid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDisconnectEvent {
    pub record: ConsoleRecord,
    pub timestamp_millis: i64,
    pub player_name: String,
    pub player_uuid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandIssuedEvent {
    pub record: ConsoleRecord,
    pub timestamp_millis: i64,
    pub player_name: String,
    pub player_uuid: Option<String>,
    /// Command verb with slashes removed
    pub command: String,
}
