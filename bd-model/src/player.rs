use bd_types::SteamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A known player on a player list.
///
/// The steam id must be in a Steam ID text or numeric form to deserialize,
/// but is not validated here. Importing the list rejects invalid ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDefinition {
    #[serde(default, alias = "Attributes")]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub last_seen: LastSeen,
    #[serde(rename = "steamid", deserialize_with = "SteamId::deserialize_unchecked")]
    pub steam_id: SteamId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proof: Vec<String>,
}

impl PlayerDefinition {
    pub fn new(steam_id: SteamId, attributes: Vec<String>) -> Self {
        Self {
            attributes,
            last_seen: LastSeen::default(),
            steam_id,
            proof: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_last_seen(mut self, last_seen: LastSeen) -> Self {
        self.last_seen = last_seen;
        self
    }

    #[must_use]
    pub fn with_proof(mut self, proof: Vec<String>) -> Self {
        self.proof = proof;
        self
    }
}

/// When and under which name a player was last seen.
///
/// `time` is stored in list files as unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSeen {
    #[serde(default)]
    pub player_name: String,
    #[serde(default, with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
}

impl LastSeen {
    pub fn new(player_name: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            player_name: player_name.into(),
            time,
        }
    }

    /// Stamped with the current time.
    pub fn now(player_name: impl Into<String>) -> Self {
        Self::new(player_name, Utc::now())
    }
}
