//! Building blocks for the `bd` binary.
//!
//! Each function loads what a subcommand needs from disk and hands it to the
//! rule engine. Errors carry the offending path as context.

use anyhow::{Context, Result};
use bd_rules::{avatar_hash, Engine, EngineConfig, MatchResult, PlayerListSchema, RuleSchema};
use bd_types::SteamId;
use bd_voiceban::read_voice_bans;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Lists to load into a fresh engine.
#[derive(Debug, Clone, Default)]
pub struct ListFiles {
    pub rules: Vec<PathBuf>,
    pub players: Vec<PathBuf>,
    /// A previously exported local player list.
    pub local: Option<PathBuf>,
}

/// Builds an engine from list files. Any unreadable or invalid file fails
/// the whole load.
pub fn load_engine(files: &ListFiles, config: EngineConfig) -> Result<Engine> {
    let engine = Engine::with_config(config);

    if let Some(path) = &files.local {
        let schema = PlayerListSchema::from_reader_unfiltered(open(path)?)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        engine
            .restore_local_players(schema)
            .with_context(|| format!("Failed to restore {}", path.display()))?;
    }

    for path in &files.rules {
        let schema = RuleSchema::from_reader(open(path)?)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        engine
            .import_rules(schema)
            .with_context(|| format!("Failed to import {}", path.display()))?;
    }

    for path in &files.players {
        let schema = PlayerListSchema::from_reader(open(path)?)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        engine
            .import_players(schema)
            .with_context(|| format!("Failed to import {}", path.display()))?;
    }

    info!(
        rule_lists = files.rules.len(),
        player_lists = files.players.len(),
        tags = ?engine.unique_tags(),
        "Lists loaded"
    );
    Ok(engine)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// What to look up in [`check`]. Empty fields are skipped.
#[derive(Debug, Clone, Default)]
pub struct CheckQuery {
    pub steam_id: Option<SteamId>,
    pub name: Option<String>,
    pub message: Option<String>,
    pub avatar: Option<PathBuf>,
}

/// Results of [`check`], grouped by query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steam_id: Vec<MatchResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<MatchResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub message: Vec<MatchResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub avatar: Vec<MatchResult>,
}

impl CheckReport {
    pub fn is_empty(&self) -> bool {
        self.steam_id.is_empty()
            && self.name.is_empty()
            && self.message.is_empty()
            && self.avatar.is_empty()
    }
}

/// Runs every query set in `query` against `engine`.
pub fn check(engine: &Engine, query: &CheckQuery) -> Result<CheckReport> {
    let mut report = CheckReport::default();
    if let Some(steam_id) = query.steam_id {
        report.steam_id = engine.match_steam(steam_id);
    }
    if let Some(name) = &query.name {
        report.name = engine.match_name(name);
    }
    if let Some(message) = &query.message {
        report.message = engine.match_message(message);
    }
    if let Some(path) = &query.avatar {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        report.avatar = engine.match_avatar(&bytes);
    }
    Ok(report)
}

/// Digest of an avatar image file, as compared by avatar rules.
pub fn hash_avatar_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(avatar_hash(&bytes))
}

/// Every valid Steam id in a voice ban file, in file order.
pub fn dump_voice_bans(path: &Path) -> Result<Vec<SteamId>> {
    let mut reader = open(path)?;
    read_voice_bans(&mut reader).with_context(|| format!("Failed to read {}", path.display()))
}
