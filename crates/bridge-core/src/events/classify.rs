//! Console line classification
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `PlayerList` logger + `logged in`       -> login
//! 2. `PlayerConnection` logger + `Disconnected` -> disconnect
//! 3. text starting with `<`                   -> chat
//! 4. text containing `issued server command`  -> command
//!
//! Anything else is ignored.

use crate::entities::ConsoleRecord;
use crate::events::EventKind;

pub const PLAYER_LIST_LOGGER: &str = "net.minecraft.server.players.PlayerList";
pub const PLAYER_CONNECTION_LOGGER: &str = "net.minecraft.server.network.PlayerConnection";

const LOGIN_MARKER: &str = "logged in";
const DISCONNECT_MARKER: &str = "Disconnected";
const CHAT_PREFIX: char = '<';
const COMMAND_MARKER: &str = "issued server command";

/// Terminal color reset, with or without its leading escape byte
pub const COLOR_RESET_MARKER: &str = "[m";
const ESCAPE: char = '\u{1b}';
/// Bytes that may trail the reset marker and still belong to it
const RESET_TAIL: usize = 3;

/// Result of classifying a console line, before identifier resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Login { player_name: String },
    Disconnect { player_name: String },
    Chat { player_name: String, message: String },
    Command { player_name: String, command: String },
}

impl Classified {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Login { .. } => EventKind::PlayerLogin,
            Self::Disconnect { .. } => EventKind::PlayerDisconnect,
            Self::Chat { .. } => EventKind::PlayerChat,
            Self::Command { .. } => EventKind::CommandIssued,
        }
    }

    pub fn player_name(&self) -> &str {
        match self {
            Self::Login { player_name }
            | Self::Disconnect { player_name }
            | Self::Chat { player_name, .. }
            | Self::Command { player_name, .. } => player_name,
        }
    }
}

/// Classify a console record, or `None` when no rule matches
pub fn classify(record: &ConsoleRecord) -> Option<Classified> {
    let text = record.message.as_str();

    if record.logger_name == PLAYER_LIST_LOGGER && text.contains(LOGIN_MARKER) {
        return Some(Classified::Login {
            player_name: login_name(text).to_string(),
        });
    }

    if record.logger_name == PLAYER_CONNECTION_LOGGER && text.contains(DISCONNECT_MARKER) {
        return Some(Classified::Disconnect {
            player_name: first_token(text).to_string(),
        });
    }

    if text.starts_with(CHAT_PREFIX) {
        let (player_name, message) = parse_chat(text);
        return Some(Classified::Chat {
            player_name,
            message,
        });
    }

    if text.contains(COMMAND_MARKER) {
        let (player_name, command) = parse_command(text);
        return Some(Classified::Command {
            player_name,
            command,
        });
    }

    None
}

/// `Steve[/127.0.0.1:5000] logged in ...` -> `Steve`
fn login_name(text: &str) -> &str {
    text.split('[').next().unwrap_or_default()
}

fn first_token(text: &str) -> &str {
    text.split(' ').next().unwrap_or_default()
}

/// Split a chat line into `(player_name, body)`
///
/// Every `<name> ` occurrence is removed from the body. When the line ends in
/// a color reset (the marker plus at most three trailing bytes), everything
/// from that reset onwards is dropped together with a preceding escape byte.
pub fn parse_chat(text: &str) -> (String, String) {
    let player_name = first_token(text).replace(['<', '>'], "");

    let reset_at = text
        .rfind(COLOR_RESET_MARKER)
        .filter(|at| text.len() - at <= COLOR_RESET_MARKER.len() + RESET_TAIL);

    let body = match reset_at {
        Some(at) => {
            let head = &text[..at];
            head.strip_suffix(ESCAPE).unwrap_or(head)
        }
        None => text,
    };

    let prefix = format!("<{player_name}> ");
    (player_name, body.replace(&prefix, ""))
}

/// Split a command line into `(player_name, verb)`
///
/// `Steve issued server command: /say hi` -> `("Steve", "hi")`; the verb is
/// the last whitespace token with slashes removed.
pub fn parse_command(text: &str) -> (String, String) {
    let player_name = first_token(text).to_string();
    let command = text
        .split(' ')
        .next_back()
        .unwrap_or_default()
        .replace('/', "");
    (player_name, command)
}
