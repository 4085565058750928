//! Rule matching engine for the bot detector.
//!
//! Classifies players by matching their Steam id, name, chat messages or
//! avatar against rule lists and player lists, and maintains the user's own
//! ("local") lists.
//!
//! # Architecture
//!
//! - **Matchers**: [`SteamIdMatcher`], [`TextMatcher`] (literal patterns or
//!   regular expressions) and [`AvatarMatcher`], each compiled once from a
//!   list entry
//! - **Schemas**: [`RuleSchema`] and [`PlayerListSchema`], a parsed list file
//!   plus its compiled matchers
//! - **Engine**: [`Engine`] owns every list behind one reader/writer lock,
//!   answers match queries, applies marks to the local player list and
//!   exports lists and the voice ban file
//!
//! # Example
//!
//! ```
//! use bd_rules::{Engine, MarkOpts};
//! use bd_types::SteamId;
//!
//! let engine = Engine::new();
//! let cheater = SteamId::from_account_id(12345);
//!
//! engine
//!     .mark(MarkOpts::new(cheater, vec!["cheater".to_string()]).with_name("xX_aimbot_Xx"))
//!     .unwrap();
//!
//! let results = engine.match_steam(cheater);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].origin, "local");
//! ```

mod config;
mod engine;
mod error;
pub mod matcher;
pub mod schema;

pub use config::EngineConfig;
pub use engine::{Engine, MarkOpts, AVATAR_HASH_LEN};
pub use error::{RulesError, RulesResult};
pub use matcher::{
    avatar_hash, AvatarMatchType, AvatarMatcher, GeneralTextMatcher, MatchResult, MatcherType,
    RegexTextMatcher, SteamIdMatcher, TextMatchType, TextMatcher,
};
pub use schema::{PlayerListSchema, RuleSchema, PLAYERLIST_SCHEMA_URL, RULES_SCHEMA_URL};
