//! Matcher strategies.
//!
//! Each matcher is compiled once from a rule or player entry and never
//! changes afterwards. Every strategy takes one kind of input:
//! - [`SteamIdMatcher`]: a Steam id
//! - [`TextMatcher`]: a player name or chat message, either through literal
//!   patterns ([`GeneralTextMatcher`]) or regular expressions
//!   ([`RegexTextMatcher`])
//! - [`AvatarMatcher`]: the hex digest of an avatar image

mod avatar;
mod steam;
mod text;

pub use avatar::{avatar_hash, AvatarMatchType, AvatarMatcher};
pub use steam::SteamIdMatcher;
pub use text::{GeneralTextMatcher, RegexTextMatcher, TextMatchType, TextMatcher};

use serde::{Deserialize, Serialize};

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherType {
    SteamId,
    Text,
    Regex,
    Avatar,
}

/// The outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Title of the list the matcher came from.
    pub origin: String,
    /// Attributes the match asserts.
    pub attributes: Vec<String>,
    pub matcher_type: MatcherType,
}

impl MatchResult {
    pub fn new(origin: impl Into<String>, attributes: Vec<String>, matcher_type: MatcherType) -> Self {
        Self {
            origin: origin.into(),
            attributes,
            matcher_type,
        }
    }
}
