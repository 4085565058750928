use bd_types::{Error, SteamId, STEAM64_BASE};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

const GABEN_64: u64 = 76_561_197_960_287_930;

// ── Parsing ───────────────────────────────────────────────────────

#[test]
fn parse_steam64() {
    let id = SteamId::parse("76561197960287930").unwrap();
    assert_eq!(id.steam64(), GABEN_64);
    assert_eq!(id.account_id(), 22202);
}

#[test]
fn parse_steam32() {
    let id = SteamId::parse("22202").unwrap();
    assert_eq!(id.steam64(), GABEN_64);
}

#[test]
fn parse_steam3_with_and_without_brackets() {
    assert_eq!(SteamId::parse("[U:1:22202]").unwrap().steam64(), GABEN_64);
    assert_eq!(SteamId::parse("U:1:22202").unwrap().steam64(), GABEN_64);
}

#[test]
fn parse_steam2() {
    assert_eq!(SteamId::parse("STEAM_0:0:11101").unwrap().steam64(), GABEN_64);
    assert_eq!(SteamId::parse("STEAM_1:0:11101").unwrap().steam64(), GABEN_64);
}

#[test]
fn parse_trims_whitespace() {
    assert_eq!(SteamId::parse("  [U:1:22202]\n").unwrap().steam64(), GABEN_64);
}

#[test]
fn parse_rejects_garbage() {
    for input in [
        "",
        "garbage",
        "[U:1:22202",
        "U:1:22202]",
        "[G:1:22202]",
        "[U:1:abc]",
        "[U:1:1:1]",
        "STEAM_0:2:11101",
        "STEAM_0:0",
        "-5",
    ] {
        assert!(SteamId::parse(input).is_err(), "accepted {input:?}");
    }
}

#[test]
fn parse_rejects_zero_account() {
    assert_eq!(
        SteamId::parse("0"),
        Err(Error::InvalidSteamId("0".to_string()))
    );
    assert!(SteamId::parse("[U:1:0]").is_err());
}

#[test]
fn parse_rejects_wrong_universe() {
    assert!(SteamId::parse("[U:2:22202]").is_err());
}

#[test]
fn from_str_matches_parse() {
    let id = SteamId::from_str("[U:1:22202]").unwrap();
    assert_eq!(id, SteamId::parse("76561197960287930").unwrap());
}

// ── Validation ────────────────────────────────────────────────────

#[test]
fn from_u64_is_unchecked() {
    let id = SteamId::from_u64(1);
    assert!(!id.is_valid());
}

#[test]
fn base_is_not_valid() {
    assert!(!SteamId::from_u64(STEAM64_BASE).is_valid());
    assert!(SteamId::from_u64(STEAM64_BASE + 1).is_valid());
}

#[test]
fn field_accessors() {
    let id = SteamId::from_u64(GABEN_64);
    assert_eq!(id.universe(), 1);
    assert_eq!(id.account_type(), 1);
    assert_eq!(id.instance(), 1);
    assert_eq!(id.account_id(), 22202);
}

// ── Formatting ────────────────────────────────────────────────────

#[test]
fn format_steam3_and_steam2() {
    let id = SteamId::from_account_id(22202);
    assert_eq!(id.steam3(), "[U:1:22202]");
    assert_eq!(id.steam2(), "STEAM_0:0:11101");
    assert_eq!(id.to_string(), "76561197960287930");
}

#[test]
fn hash_and_eq() {
    let id = SteamId::from_account_id(42);
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(SteamId::parse("[U:1:42]").unwrap());
    assert_eq!(set.len(), 1);
}

// ── Serde boundary ────────────────────────────────────────────────

#[test]
fn deserialize_number_and_string() {
    let from_number: SteamId = serde_json::from_str("76561197960287930").unwrap();
    let from_string: SteamId = serde_json::from_str("\"76561197960287930\"").unwrap();
    let from_steam3: SteamId = serde_json::from_str("\"[U:1:22202]\"").unwrap();
    assert_eq!(from_number, from_string);
    assert_eq!(from_number, from_steam3);
}

#[test]
fn parse_unchecked_keeps_invalid_forms() {
    let id = SteamId::parse_unchecked("[U:1:0]").unwrap();
    assert!(!id.is_valid());
    assert_eq!(id.account_id(), 0);
    assert_eq!(SteamId::parse_unchecked("[U:1:22202]").unwrap().steam64(), GABEN_64);
    assert!(SteamId::parse_unchecked("nope").is_err());
}

#[test]
fn deserialize_unchecked_leaves_validation_to_caller() {
    #[derive(serde::Deserialize)]
    struct Entry {
        #[serde(deserialize_with = "SteamId::deserialize_unchecked")]
        id: SteamId,
    }

    let zero: Entry = serde_json::from_str(r#"{ "id": 0 }"#).unwrap();
    assert!(!zero.id.is_valid());
    let text: Entry = serde_json::from_str(r#"{ "id": "[U:1:22202]" }"#).unwrap();
    assert_eq!(text.id.steam64(), GABEN_64);
    assert!(serde_json::from_str::<Entry>(r#"{ "id": "nope" }"#).is_err());
}

#[test]
fn deserialize_rejects_invalid() {
    assert!(serde_json::from_str::<SteamId>("0").is_err());
    assert!(serde_json::from_str::<SteamId>("\"nope\"").is_err());
    assert!(serde_json::from_str::<SteamId>("1.5").is_err());
    assert!(serde_json::from_str::<SteamId>("null").is_err());
}

#[test]
fn serialize_as_steam64_string() {
    let id = SteamId::from_account_id(22202);
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"76561197960287930\"");
}

proptest! {
    #[test]
    fn text_forms_roundtrip(account_id in 1u32..=u32::MAX) {
        let id = SteamId::from_account_id(account_id);
        prop_assert!(id.is_valid());
        prop_assert_eq!(SteamId::parse(&id.steam3()).unwrap(), id);
        prop_assert_eq!(SteamId::parse(&id.steam2()).unwrap(), id);
        prop_assert_eq!(SteamId::parse(&id.to_string()).unwrap(), id);
    }
}
