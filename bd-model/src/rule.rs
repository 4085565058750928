use serde::{Deserialize, Serialize};

/// One entry of a rule list: what to look for and what to assert on a hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub triggers: RuleTriggers,
    #[serde(default)]
    pub actions: RuleActions,
}

/// The conditions a rule reacts to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTriggers {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub avatar_match: Vec<AvatarMatchTrigger>,
    /// How multiple triggers combine. Stored for round-tripping; each trigger
    /// is compiled into its own matcher and evaluated independently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TriggerMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_text_match: Option<TextMatchTrigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatmsg_text_match: Option<TextMatchTrigger>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    MatchAll,
    MatchAny,
}

/// A text trigger applied to a player name or a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMatchTrigger {
    #[serde(default)]
    pub case_sensitive: bool,
    pub mode: TextMatchMode,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl TextMatchTrigger {
    pub fn new(mode: TextMatchMode, case_sensitive: bool, patterns: Vec<String>) -> Self {
        Self {
            case_sensitive,
            mode,
            patterns,
        }
    }
}

/// How a text pattern is compared with the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatchMode {
    /// Pattern occurs anywhere in the input.
    Contains,
    StartsWith,
    EndsWith,
    /// Whole input equals the pattern.
    Equal,
    /// Input split on single spaces; any token equals the pattern.
    Word,
    /// Declared by the list format. The general text matcher never matches
    /// in this mode; regular expressions go through a dedicated matcher.
    Regex,
}

/// An avatar trigger: the hex digest of the avatar image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarMatchTrigger {
    pub avatar_hash: String,
}

/// What a rule asserts when it matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleActions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mark: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transient_mark: Vec<String>,
    /// Kept verbatim so exported lists round-trip.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub avatar_match: Vec<serde_json::Value>,
}
