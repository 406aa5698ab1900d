//! Event kinds - the registry key for listeners

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four console event kinds the bridge understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    PlayerChat,
    PlayerLogin,
    PlayerDisconnect,
    CommandIssued,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        Self::PlayerChat,
        Self::PlayerLogin,
        Self::PlayerDisconnect,
        Self::CommandIssued,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerChat => "PLAYER_CHAT",
            Self::PlayerLogin => "PLAYER_LOGIN",
            Self::PlayerDisconnect => "PLAYER_DISCONNECT",
            Self::CommandIssued => "COMMAND_ISSUED",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event kind: {0}")]
pub struct ParseEventKindError(pub String);

impl FromStr for EventKind {
    type Err = ParseEventKindError;

    /// Accepts the wire names as well as the `on_*` hook names used by
    /// older plugin configs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLAYER_CHAT" | "on_player_chat" => Ok(Self::PlayerChat),
            "PLAYER_LOGIN" | "on_player_login" => Ok(Self::PlayerLogin),
            "PLAYER_DISCONNECT" | "on_player_disconnected" => Ok(Self::PlayerDisconnect),
            "COMMAND_ISSUED" | "on_player_execute_command" => Ok(Self::CommandIssued),
            other => Err(ParseEventKindError(other.to_string())),
        }
    }
}
