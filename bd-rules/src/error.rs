//! Error types for the rule engine.

use bd_types::SteamId;
use bd_voiceban::VoiceBanError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for rule engine operations.
pub type RulesResult<T> = Result<T, RulesError>;

/// Errors that can occur in the rule engine.
#[derive(Debug, Error)]
pub enum RulesError {
    /// A player entry carries a Steam id that failed validation.
    #[error("invalid steam id: {steam_id}")]
    ParseSteamId { steam_id: SteamId },

    /// A mark was requested with no attributes.
    #[error("at least one attribute is required")]
    InvalidAttributes,

    /// The player already carries every requested attribute.
    #[error("player {0} already has all of the given attributes")]
    DuplicateSteamId(SteamId),

    /// A regular expression pattern failed to compile.
    #[error("invalid regex {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No player list has the requested title.
    #[error("unknown player list: {0}")]
    UnknownPlayerList(String),

    /// No rule list has the requested title.
    #[error("unknown rule list: {0}")]
    UnknownRuleList(String),

    /// A player list could not be serialized.
    #[error("failed to encode player list: {0}")]
    EncodePlayers(#[source] serde_json::Error),

    /// A rule list could not be serialized.
    #[error("failed to encode rule list: {0}")]
    EncodeRules(#[source] serde_json::Error),

    /// A player list file is not valid JSON or has the wrong shape.
    #[error("failed to decode player list: {0}")]
    DecodePlayers(#[source] serde_json::Error),

    /// A rule list file is not valid JSON or has the wrong shape.
    #[error("failed to decode rule list: {0}")]
    DecodeRules(#[source] serde_json::Error),

    /// File system error.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the voice ban file failed.
    #[error(transparent)]
    VoiceBan(#[from] VoiceBanError),
}
