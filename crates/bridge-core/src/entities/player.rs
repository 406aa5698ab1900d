//! Player record - a name and stable identifier pair from the server roster

use serde::{Deserialize, Serialize};

/// A player known to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayerRecord")]
pub struct PlayerRecord {
    pub name: String,
    pub uuid: String,
}

impl PlayerRecord {
    /// Create a new player record
    pub fn new(name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
        }
    }

    /// Case-insensitive name comparison
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Exact identifier comparison
    #[inline]
    pub fn matches_uuid(&self, uuid: &str) -> bool {
        self.uuid == uuid
    }
}

/// Roster entries come from several plugin versions that disagree on the
/// name field; accept all of them.
#[derive(Deserialize)]
struct RawPlayerRecord {
    uuid: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "Name")]
    legacy_name: Option<String>,
    #[serde(default, rename = "displayName")]
    display_name: Option<String>,
}

impl TryFrom<RawPlayerRecord> for PlayerRecord {
    type Error = String;

    fn try_from(raw: RawPlayerRecord) -> Result<Self, Self::Error> {
        let name = raw
            .name
            .or(raw.legacy_name)
            .or(raw.display_name)
            .ok_or_else(|| format!("player {} has no name", raw.uuid))?;

        Ok(Self {
            name,
            uuid: raw.uuid,
        })
    }
}
