//! Tests for the voice ban codec, including byte layout and tolerated errors.

use bd_types::SteamId;
use bd_voiceban::{read_voice_bans, write_voice_bans, VoiceBanError, RECORD_SIZE};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::{self, Cursor, Write};

/// Helper: a raw file body with the given version and records.
fn make_file(version: i32, records: &[&str]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&version.to_be_bytes());
    for record in records {
        let mut padded = [0u8; RECORD_SIZE];
        padded[..record.len()].copy_from_slice(record.as_bytes());
        buf.extend_from_slice(&padded);
    }
    buf
}

/// A writer that accepts `budget` bytes and then fails.
struct FailingWriter {
    budget: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::other("disk full"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Byte layout ──────────────────────────────────────────────────

#[test]
fn write_layout_is_exact() {
    let mut buf = Vec::new();
    write_voice_bans(&mut buf, &[SteamId::from_account_id(12345)]).unwrap();

    assert_eq!(buf.len(), 4 + RECORD_SIZE);
    assert_eq!(&buf[..4], &[0, 0, 0, 1]);
    assert_eq!(&buf[4..15], b"[U:1:12345]");
    assert!(buf[15..].iter().all(|&b| b == 0));
}

#[test]
fn write_empty_collection_is_header_only() {
    let mut buf = Vec::new();
    write_voice_bans(&mut buf, &[]).unwrap();
    assert_eq!(buf, vec![0, 0, 0, 1]);
}

// ── Roundtrip ────────────────────────────────────────────────────

#[test]
fn roundtrip_preserves_order() {
    let ids = vec![
        SteamId::from_account_id(3),
        SteamId::from_account_id(1),
        SteamId::from_account_id(2),
    ];
    let mut buf = Vec::new();
    write_voice_bans(&mut buf, &ids).unwrap();

    let decoded = read_voice_bans(&mut Cursor::new(buf)).unwrap();
    assert_eq!(decoded, ids);
}

proptest! {
    #[test]
    fn roundtrip_any_collection(accounts in prop::collection::vec(1u32..=u32::MAX, 0..64)) {
        let ids: Vec<SteamId> = accounts.into_iter().map(SteamId::from_account_id).collect();
        let mut buf = Vec::new();
        write_voice_bans(&mut buf, &ids).unwrap();
        prop_assert_eq!(buf.len(), 4 + ids.len() * RECORD_SIZE);

        let decoded = read_voice_bans(&mut Cursor::new(buf)).unwrap();
        prop_assert_eq!(decoded, ids);
    }
}

// ── Version header ───────────────────────────────────────────────

#[test]
fn read_rejects_other_versions() {
    for version in [0, 2, -1] {
        let data = make_file(version, &["[U:1:1]"]);
        let err = read_voice_bans(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(err, VoiceBanError::Version(v) if v == version));
    }
}

#[test]
fn read_empty_stream_fails_on_version() {
    let err = read_voice_bans(&mut Cursor::new(Vec::<u8>::new())).unwrap_err();
    assert!(matches!(err, VoiceBanError::ReadVersion(_)));
}

#[test]
fn read_truncated_version_fails() {
    let err = read_voice_bans(&mut Cursor::new(vec![0u8, 0])).unwrap_err();
    assert!(matches!(err, VoiceBanError::ReadVersion(_)));
}

#[test]
fn read_header_only_is_empty() {
    let ids = read_voice_bans(&mut Cursor::new(make_file(1, &[]))).unwrap();
    assert!(ids.is_empty());
}

// ── Tolerated data errors ────────────────────────────────────────

#[test]
fn read_skips_invalid_records() {
    let data = make_file(1, &["[U:1:10]", "garbage", "", "[U:1:20]"]);
    let ids = read_voice_bans(&mut Cursor::new(data)).unwrap();
    assert_eq!(
        ids,
        vec![SteamId::from_account_id(10), SteamId::from_account_id(20)]
    );
}

#[test]
fn read_ignores_truncated_trailing_record() {
    let mut data = make_file(1, &["[U:1:10]"]);
    data.extend_from_slice(b"[U:1:2");
    let ids = read_voice_bans(&mut Cursor::new(data)).unwrap();
    assert_eq!(ids, vec![SteamId::from_account_id(10)]);
}

// ── Write failures ───────────────────────────────────────────────

#[test]
fn write_version_failure() {
    let mut writer = FailingWriter { budget: 0 };
    let err = write_voice_bans(&mut writer, &[SteamId::from_account_id(1)]).unwrap_err();
    assert!(matches!(err, VoiceBanError::WriteVersion(_)));
}

#[test]
fn write_record_failure_names_the_id() {
    let id = SteamId::from_account_id(99);
    let mut writer = FailingWriter { budget: 4 };
    let err = write_voice_bans(&mut writer, &[id]).unwrap_err();
    match err {
        VoiceBanError::WriteSteamId { steam_id, .. } => assert_eq!(steam_id, id),
        other => panic!("expected WriteSteamId, got {other:?}"),
    }
}

#[test]
fn error_display_includes_cause() {
    let err = VoiceBanError::Version(7);
    assert!(err.to_string().contains('7'));
}
