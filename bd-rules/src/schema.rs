//! Rule list and player list documents.
//!
//! A schema is the parsed JSON file plus the matchers compiled from it. The
//! engine registers matchers once, at import time; a schema never derives
//! matchers on its own.

use crate::error::{RulesError, RulesResult};
use crate::matcher::{AvatarMatcher, SteamIdMatcher, TextMatcher};
use bd_model::{
    contains_attribute, FileInfo, PlayerDefinition, RuleDefinition, CHEATER_ATTRIBUTE,
    LOCAL_LIST_TITLE,
};
use bd_types::SteamId;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

pub const RULES_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/PazerOP/tf2_bot_detector/master/schemas/v3/rules.schema.json";

pub const PLAYERLIST_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/PazerOP/tf2_bot_detector/master/schemas/v3/playerlist.schema.json";

/// Serializes `value` as JSON indented with four spaces.
fn write_pretty<W: Write, T: Serialize>(writer: W, value: &T) -> serde_json::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)
}

/// A rule list and the matchers compiled from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSchema {
    #[serde(rename = "$schema", default)]
    pub schema: String,
    #[serde(default)]
    pub file_info: FileInfo,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,

    #[serde(skip)]
    local: bool,
    #[serde(skip)]
    text_matchers: Vec<TextMatcher>,
    #[serde(skip)]
    avatar_matchers: Vec<AvatarMatcher>,
}

impl RuleSchema {
    /// An empty list with the given metadata.
    pub fn new(file_info: FileInfo) -> Self {
        Self {
            schema: RULES_SCHEMA_URL.to_string(),
            file_info,
            rules: Vec::new(),
            local: false,
            text_matchers: Vec::new(),
            avatar_matchers: Vec::new(),
        }
    }

    /// The user's own rule list.
    pub fn local() -> Self {
        Self {
            local: true,
            ..Self::new(FileInfo::titled(LOCAL_LIST_TITLE))
        }
    }

    /// Parses a rule list file.
    pub fn from_reader<R: Read>(reader: R) -> RulesResult<Self> {
        serde_json::from_reader(reader).map_err(RulesError::DecodeRules)
    }

    /// Writes the list as JSON, indented with four spaces.
    pub fn to_writer<W: Write>(&self, writer: W) -> RulesResult<()> {
        write_pretty(writer, self).map_err(RulesError::EncodeRules)
    }

    pub fn title(&self) -> &str {
        &self.file_info.title
    }

    /// Returns true for the user's own list, whatever its title.
    pub fn is_local(&self) -> bool {
        self.local
    }

    pub(crate) fn set_local(&mut self, local: bool) {
        self.local = local;
    }

    pub fn register_text_matcher(&mut self, matcher: impl Into<TextMatcher>) {
        self.text_matchers.push(matcher.into());
    }

    pub fn register_avatar_matcher(&mut self, matcher: AvatarMatcher) {
        self.avatar_matchers.push(matcher);
    }

    pub fn text_matchers(&self) -> &[TextMatcher] {
        &self.text_matchers
    }

    pub fn avatar_matchers(&self) -> &[AvatarMatcher] {
        &self.avatar_matchers
    }
}

/// A player list and the Steam id matchers compiled from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerListSchema {
    #[serde(rename = "$schema", default)]
    pub schema: String,
    #[serde(default)]
    pub file_info: FileInfo,
    #[serde(default)]
    pub players: Vec<PlayerDefinition>,

    #[serde(skip)]
    local: bool,
    #[serde(skip)]
    steam_matchers: Vec<SteamIdMatcher>,
}

impl PlayerListSchema {
    /// An empty list with the given metadata.
    pub fn new(file_info: FileInfo) -> Self {
        Self {
            schema: PLAYERLIST_SCHEMA_URL.to_string(),
            file_info,
            players: Vec::new(),
            local: false,
            steam_matchers: Vec::new(),
        }
    }

    /// The user's own player list.
    pub fn local() -> Self {
        Self {
            local: true,
            ..Self::new(FileInfo::titled(LOCAL_LIST_TITLE))
        }
    }

    /// Parses a player list file.
    ///
    /// Only players tagged `cheater` are kept, and `cheater` is the only
    /// attribute they keep.
    pub fn from_reader<R: Read>(reader: R) -> RulesResult<Self> {
        let mut schema = Self::from_reader_unfiltered(reader)?;
        schema.players.retain_mut(|player| {
            if !contains_attribute(&player.attributes, CHEATER_ATTRIBUTE) {
                return false;
            }
            player.attributes = vec![CHEATER_ATTRIBUTE.to_string()];
            true
        });
        Ok(schema)
    }

    /// Parses the user's own exported list. Nothing is filtered.
    pub fn from_reader_unfiltered<R: Read>(reader: R) -> RulesResult<Self> {
        serde_json::from_reader(reader).map_err(RulesError::DecodePlayers)
    }

    /// Writes the list as JSON, indented with four spaces.
    pub fn to_writer<W: Write>(&self, writer: W) -> RulesResult<()> {
        write_pretty(writer, self).map_err(RulesError::EncodePlayers)
    }

    pub fn title(&self) -> &str {
        &self.file_info.title
    }

    /// Returns true for the user's own list, whatever its title.
    pub fn is_local(&self) -> bool {
        self.local
    }

    pub(crate) fn set_local(&mut self, local: bool) {
        self.local = local;
    }

    pub fn register_steam_matcher(&mut self, matcher: SteamIdMatcher) {
        self.steam_matchers.push(matcher);
    }

    /// Removes the matcher for `steam_id`, returning whether one existed.
    pub(crate) fn unregister_steam_matcher(&mut self, steam_id: SteamId) -> bool {
        let before = self.steam_matchers.len();
        self.steam_matchers.retain(|m| m.steam_id() != steam_id);
        self.steam_matchers.len() != before
    }

    pub fn steam_matchers(&self) -> &[SteamIdMatcher] {
        &self.steam_matchers
    }

    pub fn player(&self, steam_id: SteamId) -> Option<&PlayerDefinition> {
        self.players.iter().find(|p| p.steam_id == steam_id)
    }
}
