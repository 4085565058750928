//! Error types for the voice ban codec.

use bd_types::SteamId;
use std::io;
use thiserror::Error;

/// Result type for voice ban operations.
pub type VoiceBanResult<T> = Result<T, VoiceBanError>;

/// Errors that can occur reading or writing a voice ban file.
#[derive(Debug, Error)]
pub enum VoiceBanError {
    /// The version header could not be read.
    #[error("failed to read voice ban version: {0}")]
    ReadVersion(#[source] io::Error),

    /// The version header holds something other than 1.
    #[error("unsupported voice ban version: {0}")]
    Version(i32),

    /// A record could not be read.
    #[error("failed to read voice ban record: {0}")]
    Read(#[source] io::Error),

    /// The version header could not be written.
    #[error("failed to write voice ban version: {0}")]
    WriteVersion(#[source] io::Error),

    /// A record could not be written.
    #[error("failed to write voice ban entry {steam_id}: {source}")]
    WriteSteamId {
        steam_id: SteamId,
        #[source]
        source: io::Error,
    },

    /// Buffered records could not be flushed.
    #[error("failed to flush voice ban file: {0}")]
    Flush(#[source] io::Error),
}
