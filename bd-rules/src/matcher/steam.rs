use super::{MatchResult, MatcherType};
use bd_model::PlayerDefinition;
use bd_types::SteamId;
use chrono::{DateTime, Utc};

/// Matches one Steam id.
///
/// Also remembers when the player was last seen so the newest entries can be
/// picked for the voice ban file without going back to the player list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamIdMatcher {
    origin: String,
    steam_id: SteamId,
    attributes: Vec<String>,
    last_seen: DateTime<Utc>,
}

impl SteamIdMatcher {
    pub fn new(origin: impl Into<String>, steam_id: SteamId, attributes: Vec<String>) -> Self {
        Self {
            origin: origin.into(),
            steam_id,
            attributes,
            last_seen: DateTime::<Utc>::default(),
        }
    }

    /// Builds the matcher for a player entry of the list titled `origin`.
    pub fn for_player(origin: impl Into<String>, player: &PlayerDefinition) -> Self {
        Self {
            origin: origin.into(),
            steam_id: player.steam_id,
            attributes: player.attributes.clone(),
            last_seen: player.last_seen.time,
        }
    }

    pub fn steam_id(&self) -> SteamId {
        self.steam_id
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    pub fn matches(&self, steam_id: SteamId) -> Option<MatchResult> {
        (steam_id == self.steam_id).then(|| {
            MatchResult::new(&self.origin, self.attributes.clone(), MatcherType::SteamId)
        })
    }
}
