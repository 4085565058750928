//! List file model for the bot detector.
//!
//! Defines the JSON shapes shared by rule lists and player lists:
//! - [`FileInfo`]: list metadata (title, authors, update url)
//! - [`RuleDefinition`]: triggers (name text, chat text, avatar hashes) and
//!   the attributes a match asserts
//! - [`PlayerDefinition`]: a known player and the attributes they carry
//! - attribute helpers, which compare tags case-insensitively everywhere
//!
//! These types are pure data. Compiling them into matchers and evaluating
//! candidates happens in `bd-rules`.

mod attributes;
mod file_info;
mod player;
mod rule;

pub use attributes::{contains_attribute, dedup_attributes, has_any_attribute, merge_attributes};
pub use file_info::FileInfo;
pub use player::{LastSeen, PlayerDefinition};
pub use rule::{
    AvatarMatchTrigger, RuleActions, RuleDefinition, RuleTriggers, TextMatchMode,
    TextMatchTrigger, TriggerMode,
};

/// Title given to the user's own rule list and player list.
pub const LOCAL_LIST_TITLE: &str = "local";

/// The only attribute kept when parsing a third-party player list.
pub const CHEATER_ATTRIBUTE: &str = "cheater";
