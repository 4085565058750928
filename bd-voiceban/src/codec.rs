//! Voice ban file reader and writer.

use crate::error::{VoiceBanError, VoiceBanResult};
use bd_types::SteamId;
use std::io::{self, Read, Write};
use tracing::{debug, warn};

/// The only version the game client understands.
pub const VOICE_BAN_VERSION: i32 = 1;

/// Size of one record in bytes.
pub const RECORD_SIZE: usize = 32;

/// File name the client loads from its game directory.
pub const VOICE_BAN_FILE_NAME: &str = "voice_ban.dt";

/// Reads every Steam id from a voice ban file.
///
/// Records that do not hold a valid Steam id are logged and skipped. A
/// trailing partial record is ignored the same way.
pub fn read_voice_bans<R: Read>(reader: &mut R) -> VoiceBanResult<Vec<SteamId>> {
    // Read 4-byte version header
    let mut version_bytes = [0u8; 4];
    reader
        .read_exact(&mut version_bytes)
        .map_err(VoiceBanError::ReadVersion)?;
    let version = i32::from_be_bytes(version_bytes);
    if version != VOICE_BAN_VERSION {
        return Err(VoiceBanError::Version(version));
    }

    let mut ids = Vec::new();
    let mut record = [0u8; RECORD_SIZE];
    loop {
        let filled = read_record(reader, &mut record).map_err(VoiceBanError::Read)?;
        if filled == 0 {
            break;
        }
        if filled < RECORD_SIZE {
            warn!(bytes = filled, "Ignoring truncated voice ban record");
            break;
        }

        match decode_record(&record) {
            Some(steam_id) => ids.push(steam_id),
            None => warn!(
                record = %String::from_utf8_lossy(trim_zeros(&record)),
                "Skipping invalid voice ban entry"
            ),
        }
    }

    debug!(count = ids.len(), "Read voice bans");
    Ok(ids)
}

/// Writes a version header followed by one record per Steam id, in order.
pub fn write_voice_bans<W: Write>(writer: &mut W, steam_ids: &[SteamId]) -> VoiceBanResult<()> {
    writer
        .write_all(&VOICE_BAN_VERSION.to_be_bytes())
        .map_err(VoiceBanError::WriteVersion)?;

    for &steam_id in steam_ids {
        writer
            .write_all(&encode_record(steam_id))
            .map_err(|source| VoiceBanError::WriteSteamId { steam_id, source })?;
    }

    writer.flush().map_err(VoiceBanError::Flush)?;
    debug!(count = steam_ids.len(), "Wrote voice bans");
    Ok(())
}

/// Fills `buf` until it is full or the reader is exhausted, returning the
/// number of bytes read.
fn read_record<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn trim_zeros(record: &[u8]) -> &[u8] {
    let end = record
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    &record[..end]
}

fn decode_record(record: &[u8; RECORD_SIZE]) -> Option<SteamId> {
    let text = std::str::from_utf8(trim_zeros(record)).ok()?;
    SteamId::parse(text).ok()
}

fn encode_record(steam_id: SteamId) -> [u8; RECORD_SIZE] {
    let mut record = [0u8; RECORD_SIZE];
    // The longest Steam3 form, "[U:255:4294967295]", is 18 bytes.
    let text = steam_id.steam3();
    record[..text.len()].copy_from_slice(text.as_bytes());
    record
}
