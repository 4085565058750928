//! Codec for the game client's voice ban file (`voice_ban.dt`).
//!
//! # File Format
//!
//! ```text
//! +----------------+------------------+------------------+-----
//! | version (i32)  | record (32 bytes)| record (32 bytes)| ...
//! | big-endian = 1 |                  |                  |
//! +----------------+------------------+------------------+-----
//! ```
//!
//! Each record is a Steam3 id (`[U:1:12345]`) in ASCII, zero-padded to 32
//! bytes. There is no count and no other framing; the client reads records
//! until end of file.

mod codec;
mod error;

pub use codec::{read_voice_bans, write_voice_bans, RECORD_SIZE, VOICE_BAN_FILE_NAME, VOICE_BAN_VERSION};
pub use error::{VoiceBanError, VoiceBanResult};
