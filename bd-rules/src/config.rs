//! Engine configuration.

use bd_voiceban::VOICE_BAN_FILE_NAME;

/// Configuration for the matching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of players written to the voice ban file.
    pub voice_ban_limit: usize,
    /// File name of the voice ban file inside the game directory.
    pub voice_ban_file_name: String,
    /// Attribute asserted by a name trigger whose rule marks nothing.
    pub default_name_attribute: String,
    /// Attribute asserted by a chat trigger whose rule marks nothing.
    pub default_message_attribute: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            voice_ban_limit: 200,
            voice_ban_file_name: VOICE_BAN_FILE_NAME.to_string(),
            default_name_attribute: "trigger_name".to_string(),
            default_message_attribute: "trigger_msg".to_string(),
        }
    }
}
