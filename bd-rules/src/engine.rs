//! Matching engine: owns every imported list and answers match queries.
//!
//! All state sits behind one reader/writer lock. Match queries run on every
//! parsed log line and only take the shared lock. Imports, marks and unmarks
//! are rare and take the exclusive lock. Imports compile the whole list
//! before taking the lock, so readers never see a half-built list.

use crate::config::EngineConfig;
use crate::error::{RulesError, RulesResult};
use crate::matcher::{
    avatar_hash, AvatarMatchType, AvatarMatcher, GeneralTextMatcher, MatchResult, SteamIdMatcher,
    TextMatchType,
};
use crate::schema::{PlayerListSchema, RuleSchema};
use bd_model::{
    dedup_attributes, has_any_attribute, merge_attributes, LastSeen, PlayerDefinition,
    TextMatchTrigger, LOCAL_LIST_TITLE,
};
use bd_types::SteamId;
use bd_voiceban::write_voice_bans;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::iter;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Length of the hex avatar hashes accepted from rule files.
pub const AVATAR_HASH_LEN: usize = 40;

/// Options for [`Engine::mark`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOpts {
    pub steam_id: SteamId,
    /// Must not be empty.
    pub attributes: Vec<String>,
    pub proof: Vec<String>,
    /// Name the player was using when marked.
    pub name: String,
}

impl MarkOpts {
    pub fn new(steam_id: SteamId, attributes: Vec<String>) -> Self {
        Self {
            steam_id,
            attributes,
            proof: Vec::new(),
            name: String::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_proof(mut self, proof: Vec<String>) -> Self {
        self.proof = proof;
        self
    }
}

#[derive(Debug)]
struct EngineState {
    local_rules: RuleSchema,
    imported_rules: Vec<RuleSchema>,
    local_players: PlayerListSchema,
    imported_players: Vec<PlayerListSchema>,
    /// Every attribute seen on a player list, first spelling wins.
    known_tags: Vec<String>,
}

impl EngineState {
    /// Local list first, then imported lists in import order.
    fn rule_lists(&self) -> impl Iterator<Item = &RuleSchema> {
        iter::once(&self.local_rules).chain(&self.imported_rules)
    }

    /// Local list first, then imported lists in import order.
    fn player_lists(&self) -> impl Iterator<Item = &PlayerListSchema> {
        iter::once(&self.local_players).chain(&self.imported_players)
    }

    fn match_text(&self, kind: TextMatchType, text: &str) -> Vec<MatchResult> {
        self.rule_lists()
            .filter_map(|list| {
                list.text_matchers()
                    .iter()
                    .filter(|m| m.match_type().applies_to(kind))
                    .find_map(|m| m.matches(text))
            })
            .collect()
    }
}

/// Replaces the list sharing `list`'s title, or appends it. Returns true on
/// replacement.
fn upsert_by_title<T>(lists: &mut Vec<T>, list: T, title: fn(&T) -> &str) -> bool {
    match lists.iter().position(|l| title(l) == title(&list)) {
        Some(index) => {
            lists[index] = list;
            true
        }
        None => {
            lists.push(list);
            false
        }
    }
}

fn is_avatar_hash(hash: &str) -> bool {
    hash.len() == AVATAR_HASH_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit())
}

/// The rule matching engine.
///
/// Send + Sync; share it between the log reader, the UI and background tasks
/// with an `Arc<Engine>`.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    state: RwLock<EngineState>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine holding only the empty local rule and player lists.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            state: RwLock::new(EngineState {
                local_rules: RuleSchema::local(),
                imported_rules: Vec::new(),
                local_players: PlayerListSchema::local(),
                imported_players: Vec::new(),
                known_tags: Vec::new(),
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Every mutation builds its result before touching the state, so a
    // poisoned lock still guards a consistent value.
    fn read(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Import ───────────────────────────────────────────────────

    /// Compiles a rule list and adds it, replacing any imported rule list
    /// with the same title. Returns the number of rules.
    pub fn import_rules(&self, mut schema: RuleSchema) -> RulesResult<usize> {
        self.compile_rule_list(&mut schema);
        schema.set_local(false);

        let count = schema.rules.len();
        let title = schema.title().to_string();
        let replaced = upsert_by_title(&mut self.write().imported_rules, schema, RuleSchema::title);

        info!(list = %title, rules = count, replaced, "Imported rule list");
        Ok(count)
    }

    /// Validates and compiles a player list and adds it, replacing any
    /// imported player list with the same title. Returns the number of
    /// players.
    ///
    /// One invalid Steam id rejects the whole list with
    /// [`RulesError::ParseSteamId`]. A `steamid` that is not a Steam ID form
    /// at all already fails when the file is parsed, with
    /// [`RulesError::DecodePlayers`].
    pub fn import_players(&self, mut schema: PlayerListSchema) -> RulesResult<usize> {
        let tags = Self::compile_player_list(&mut schema)?;
        schema.set_local(false);

        let count = schema.players.len();
        let title = schema.title().to_string();
        let replaced = {
            let mut state = self.write();
            merge_attributes(&mut state.known_tags, &tags);
            upsert_by_title(&mut state.imported_players, schema, PlayerListSchema::title)
        };

        info!(list = %title, players = count, replaced, "Imported player list");
        Ok(count)
    }

    /// Replaces the local player list with a previously exported one.
    ///
    /// Validation is the same as [`Engine::import_players`]. The list keeps
    /// the local title whatever the file says.
    pub fn restore_local_players(&self, mut schema: PlayerListSchema) -> RulesResult<usize> {
        schema.file_info.title = LOCAL_LIST_TITLE.to_string();
        let tags = Self::compile_player_list(&mut schema)?;
        schema.set_local(true);

        let count = schema.players.len();
        {
            let mut state = self.write();
            merge_attributes(&mut state.known_tags, &tags);
            state.local_players = schema;
        }

        info!(players = count, "Restored local player list");
        Ok(count)
    }

    fn compile_rule_list(&self, schema: &mut RuleSchema) {
        let origin = schema.title().to_string();
        let mut text_matchers = Vec::new();
        let mut avatar_matchers = Vec::new();

        for rule in &schema.rules {
            let triggers = &rule.triggers;
            let mark = &rule.actions.mark;

            if let Some(trigger) = &triggers.username_text_match {
                text_matchers.push(text_matcher(
                    &origin,
                    TextMatchType::Name,
                    trigger,
                    mark,
                    &self.config.default_name_attribute,
                ));
            }
            if let Some(trigger) = &triggers.chatmsg_text_match {
                text_matchers.push(text_matcher(
                    &origin,
                    TextMatchType::Message,
                    trigger,
                    mark,
                    &self.config.default_message_attribute,
                ));
            }

            let hashes: Vec<String> = triggers
                .avatar_match
                .iter()
                .map(|trigger| &trigger.avatar_hash)
                .filter(|hash| is_avatar_hash(hash))
                .cloned()
                .collect();
            if !hashes.is_empty() {
                avatar_matchers.push(AvatarMatcher::new(
                    &origin,
                    AvatarMatchType::Exact,
                    mark.clone(),
                    hashes,
                ));
            }
        }

        for matcher in text_matchers {
            schema.register_text_matcher(matcher);
        }
        for matcher in avatar_matchers {
            schema.register_avatar_matcher(matcher);
        }
    }

    /// Registers one Steam id matcher per player and returns the list's
    /// attributes. Fails before registering anything if any id is invalid.
    fn compile_player_list(schema: &mut PlayerListSchema) -> RulesResult<Vec<String>> {
        if let Some(player) = schema.players.iter().find(|p| !p.steam_id.is_valid()) {
            return Err(RulesError::ParseSteamId {
                steam_id: player.steam_id,
            });
        }

        let origin = schema.title().to_string();
        let mut tags = Vec::new();
        let mut matchers = Vec::with_capacity(schema.players.len());
        for player in &mut schema.players {
            player.attributes = dedup_attributes(std::mem::take(&mut player.attributes));
            merge_attributes(&mut tags, &player.attributes);
            matchers.push(SteamIdMatcher::for_player(&origin, player));
        }

        for matcher in matchers {
            schema.register_steam_matcher(matcher);
        }
        Ok(tags)
    }

    // ── Local list ───────────────────────────────────────────────

    /// Marks a player on the local list.
    ///
    /// A new player is added with the given attributes and proof, last seen
    /// now. A known player gains whichever attributes they lack; if they
    /// already have all of them the mark fails with
    /// [`RulesError::DuplicateSteamId`].
    pub fn mark(&self, opts: MarkOpts) -> RulesResult<()> {
        if opts.attributes.is_empty() {
            return Err(RulesError::InvalidAttributes);
        }
        if !opts.steam_id.is_valid() {
            return Err(RulesError::ParseSteamId {
                steam_id: opts.steam_id,
            });
        }
        let steam_id = opts.steam_id;
        let attributes = dedup_attributes(opts.attributes);

        let mut guard = self.write();
        let state = &mut *guard;
        let local = &mut state.local_players;
        let origin = local.title().to_string();

        let player = match local.players.iter_mut().find(|p| p.steam_id == steam_id) {
            Some(player) => {
                if merge_attributes(&mut player.attributes, &attributes) == 0 {
                    return Err(RulesError::DuplicateSteamId(steam_id));
                }
                player.clone()
            }
            None => {
                let player = PlayerDefinition::new(steam_id, attributes)
                    .with_last_seen(LastSeen::now(opts.name))
                    .with_proof(opts.proof);
                local.players.push(player.clone());
                player
            }
        };

        local.unregister_steam_matcher(steam_id);
        local.register_steam_matcher(SteamIdMatcher::for_player(&origin, &player));
        merge_attributes(&mut state.known_tags, &player.attributes);

        info!(steam_id = %steam_id.steam3(), attributes = ?player.attributes, "Marked player");
        Ok(())
    }

    /// Removes a player from the local list. Returns whether they were on it.
    pub fn unmark(&self, steam_id: SteamId) -> bool {
        let mut state = self.write();
        let local = &mut state.local_players;

        let before = local.players.len();
        local.players.retain(|p| p.steam_id != steam_id);
        let removed = local.players.len() != before;
        local.unregister_steam_matcher(steam_id);

        if removed {
            info!(steam_id = %steam_id.steam3(), "Unmarked player");
        }
        removed
    }

    /// Snapshot of a player's entry on the local list.
    pub fn local_player(&self, steam_id: SteamId) -> Option<PlayerDefinition> {
        self.read().local_players.player(steam_id).cloned()
    }

    // ── Queries ──────────────────────────────────────────────────

    /// At most one result per player list.
    pub fn match_steam(&self, steam_id: SteamId) -> Vec<MatchResult> {
        let results: Vec<MatchResult> = self
            .read()
            .player_lists()
            .filter_map(|list| {
                list.steam_matchers()
                    .iter()
                    .find_map(|m| m.matches(steam_id))
            })
            .collect();

        if !results.is_empty() {
            debug!(steam_id = %steam_id.steam3(), matches = results.len(), "Steam id matched");
        }
        results
    }

    /// Runs name and any-type text matchers; at most one result per rule list.
    pub fn match_name(&self, name: &str) -> Vec<MatchResult> {
        let results = self.read().match_text(TextMatchType::Name, name);
        if !results.is_empty() {
            debug!(name = %name, matches = results.len(), "Name matched");
        }
        results
    }

    /// Runs message and any-type text matchers; at most one result per rule
    /// list.
    pub fn match_message(&self, message: &str) -> Vec<MatchResult> {
        let results = self.read().match_text(TextMatchType::Message, message);
        if !results.is_empty() {
            debug!(chat = %message, matches = results.len(), "Message matched");
        }
        results
    }

    /// Hashes the avatar once and checks it against every rule list. Empty
    /// input matches nothing and is not hashed.
    pub fn match_avatar(&self, avatar: &[u8]) -> Vec<MatchResult> {
        if avatar.is_empty() {
            return Vec::new();
        }

        let digest = avatar_hash(avatar);
        let results: Vec<MatchResult> = self
            .read()
            .rule_lists()
            .filter_map(|list| {
                list.avatar_matchers()
                    .iter()
                    .find_map(|m| m.matches(&digest))
            })
            .collect();

        if !results.is_empty() {
            debug!(digest = %digest, matches = results.len(), "Avatar matched");
        }
        results
    }

    /// The most recently seen players carrying any of `attributes`, newest
    /// first, at most `max` of them. A player listed more than once counts
    /// once, at their newest sighting.
    pub fn find_newest_entries(&self, max: usize, attributes: &[String]) -> Vec<SteamId> {
        let mut entries: Vec<_> = self
            .read()
            .player_lists()
            .flat_map(|list| list.steam_matchers())
            .filter(|m| has_any_attribute(m.attributes(), attributes))
            .map(|m| (m.last_seen(), m.steam_id()))
            .collect();

        entries.sort_by(|a, b| b.0.cmp(&a.0));

        let mut seen = HashSet::new();
        entries
            .into_iter()
            .map(|(_, steam_id)| steam_id)
            .filter(|steam_id| seen.insert(*steam_id))
            .take(max)
            .collect()
    }

    /// Every attribute seen on a player list so far.
    pub fn unique_tags(&self) -> Vec<String> {
        self.read().known_tags.clone()
    }

    pub fn rule_list_titles(&self) -> Vec<String> {
        self.read().rule_lists().map(|l| l.title().to_string()).collect()
    }

    pub fn player_list_titles(&self) -> Vec<String> {
        self.read()
            .player_lists()
            .map(|l| l.title().to_string())
            .collect()
    }

    // ── Export ───────────────────────────────────────────────────

    /// Writes the player list titled `title` as JSON. The local list wins
    /// over an imported list with the same title.
    ///
    /// Holds the shared lock while writing; pass a fast writer.
    pub fn export_players<W: Write>(&self, title: &str, writer: W) -> RulesResult<()> {
        let state = self.read();
        let list = state
            .player_lists()
            .find(|l| l.title() == title)
            .ok_or_else(|| RulesError::UnknownPlayerList(title.to_string()))?;
        list.to_writer(writer)
    }

    /// Writes the rule list titled `title` as JSON. The local list wins over
    /// an imported list with the same title.
    ///
    /// Holds the shared lock while writing; pass a fast writer.
    pub fn export_rules<W: Write>(&self, title: &str, writer: W) -> RulesResult<()> {
        let state = self.read();
        let list = state
            .rule_lists()
            .find(|l| l.title() == title)
            .ok_or_else(|| RulesError::UnknownRuleList(title.to_string()))?;
        list.to_writer(writer)
    }

    /// Rewrites the game client's voice ban file in `tf2_dir` with the newest
    /// players carrying any of `kickable_tags`. Returns how many were written.
    ///
    /// Leaves an existing file untouched when nobody qualifies. The game must
    /// not be running; the client only reads this file at launch.
    pub fn export_voice_bans(&self, tf2_dir: &Path, kickable_tags: &[String]) -> RulesResult<usize> {
        let steam_ids = self.find_newest_entries(self.config.voice_ban_limit, kickable_tags);
        if steam_ids.is_empty() {
            debug!("No players to voice ban");
            return Ok(0);
        }

        let path = tf2_dir.join(&self.config.voice_ban_file_name);
        let mut file = File::create(&path).map_err(|source| RulesError::Io {
            path: path.clone(),
            source,
        })?;
        // Unbuffered: each record is one write, so a failure names its record.
        write_voice_bans(&mut file, &steam_ids)?;

        info!(path = %path.display(), count = steam_ids.len(), "Exported voice bans");
        Ok(steam_ids.len())
    }
}

fn text_matcher(
    origin: &str,
    match_type: TextMatchType,
    trigger: &TextMatchTrigger,
    mark: &[String],
    default_attribute: &str,
) -> GeneralTextMatcher {
    let attributes = if mark.is_empty() {
        vec![default_attribute.to_string()]
    } else {
        mark.to_vec()
    };
    GeneralTextMatcher::new(
        origin,
        match_type,
        trigger.mode,
        trigger.case_sensitive,
        attributes,
        trigger.patterns.clone(),
    )
}
