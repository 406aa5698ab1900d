//! Response models for the management API
//!
//! Every model tolerates missing and unknown fields; anything not modelled
//! explicitly is kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of `execute_command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Raw response body
    Output(String),
    /// The request timed out; common for commands that print nothing
    NoResponse,
}

impl CommandOutput {
    pub const NO_RESPONSE_TEXT: &'static str = "this command has no return";

    /// Response text, or the no-response sentinel
    pub fn text(&self) -> &str {
        match self {
            Self::Output(text) => text,
            Self::NoResponse => Self::NO_RESPONSE_TEXT,
        }
    }

    #[inline]
    pub fn is_no_response(&self) -> bool {
        matches!(self, Self::NoResponse)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerInfo {
    pub name: String,
    pub motd: String,
    pub version: String,
    pub bukkit_version: String,
    pub max_players: u32,
    pub online_players: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnlinePlayer {
    pub uuid: String,
    pub display_name: String,
    pub address: String,
    pub port: u16,
    pub op: bool,
    pub whitelisted: bool,
    pub banned: bool,
    pub health: f64,
    pub hunger: f64,
    pub gamemode: String,
    pub dimension: String,
    pub location: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct World {
    pub name: String,
    pub uuid: String,
    pub environment: String,
    pub difficulty: String,
    pub time: i64,
    pub storm: bool,
    pub thundering: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreboardSummary {
    pub objectives: Vec<String>,
    pub entries: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Objective {
    pub name: String,
    pub display_name: String,
    pub display_slot: String,
    pub criterion: String,
    pub scores: Vec<Score>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    pub entry: String,
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistEntry {
    pub uuid: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorEntry {
    pub uuid: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryItem {
    pub slot: i32,
    pub id: String,
    pub count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub enabled: bool,
    pub description: Option<String>,
    pub authors: Vec<String>,
    pub website: Option<String>,
    pub depends: Vec<String>,
    pub soft_depends: Vec<String>,
    pub api_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
