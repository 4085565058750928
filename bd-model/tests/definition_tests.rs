use bd_model::{
    AvatarMatchTrigger, FileInfo, LastSeen, PlayerDefinition, RuleActions, RuleDefinition,
    RuleTriggers, TextMatchMode, TextMatchTrigger, TriggerMode,
};
use bd_types::SteamId;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── FileInfo ─────────────────────────────────────────────────────

#[test]
fn file_info_titled() {
    let info = FileInfo::titled("community");
    assert_eq!(info.title, "community");
    assert!(info.authors.is_empty());
    assert!(info.update_url.is_empty());
}

#[test]
fn file_info_missing_fields_default() {
    let info: FileInfo = serde_json::from_value(json!({"title": "x"})).unwrap();
    assert_eq!(info, FileInfo::titled("x"));
}

// ── RuleDefinition ───────────────────────────────────────────────

#[test]
fn rule_deserializes_full_shape() {
    let rule: RuleDefinition = serde_json::from_value(json!({
        "description": "known bot names",
        "triggers": {
            "avatar_match": [{"avatar_hash": "0123456789abcdef0123456789abcdef01234567"}],
            "mode": "match_any",
            "username_text_match": {
                "case_sensitive": true,
                "mode": "starts_with",
                "patterns": ["(1)"]
            },
            "chatmsg_text_match": {
                "case_sensitive": false,
                "mode": "word",
                "patterns": ["discord.gg"]
            }
        },
        "actions": {"mark": ["bot"], "transient_mark": ["suspicious"]}
    }))
    .unwrap();

    assert_eq!(rule.description, "known bot names");
    assert_eq!(rule.triggers.mode, Some(TriggerMode::MatchAny));
    assert_eq!(
        rule.triggers.username_text_match,
        Some(TextMatchTrigger::new(
            TextMatchMode::StartsWith,
            true,
            vec!["(1)".to_string()]
        ))
    );
    assert_eq!(
        rule.triggers.chatmsg_text_match.as_ref().map(|t| t.mode),
        Some(TextMatchMode::Word)
    );
    assert_eq!(
        rule.triggers.avatar_match,
        vec![AvatarMatchTrigger {
            avatar_hash: "0123456789abcdef0123456789abcdef01234567".to_string()
        }]
    );
    assert_eq!(rule.actions.mark, vec!["bot".to_string()]);
    assert_eq!(rule.actions.transient_mark, vec!["suspicious".to_string()]);
}

#[test]
fn text_modes_use_snake_case() {
    for (text, mode) in [
        ("contains", TextMatchMode::Contains),
        ("starts_with", TextMatchMode::StartsWith),
        ("ends_with", TextMatchMode::EndsWith),
        ("equal", TextMatchMode::Equal),
        ("word", TextMatchMode::Word),
        ("regex", TextMatchMode::Regex),
    ] {
        let parsed: TextMatchMode = serde_json::from_value(json!(text)).unwrap();
        assert_eq!(parsed, mode);
    }
}

#[test]
fn unknown_text_mode_is_rejected() {
    assert!(serde_json::from_value::<TextMatchMode>(json!("fuzzy")).is_err());
}

#[test]
fn empty_rule_serializes_without_optional_fields() {
    let rule = RuleDefinition {
        description: "empty".to_string(),
        triggers: RuleTriggers::default(),
        actions: RuleActions::default(),
    };
    let value = serde_json::to_value(&rule).unwrap();
    assert_eq!(
        value,
        json!({"description": "empty", "triggers": {}, "actions": {}})
    );
}

// ── PlayerDefinition ─────────────────────────────────────────────

#[test]
fn player_accepts_numeric_and_string_ids() {
    let numeric: PlayerDefinition = serde_json::from_value(json!({
        "attributes": ["cheater"],
        "steamid": 76561197960287930u64
    }))
    .unwrap();
    let text: PlayerDefinition = serde_json::from_value(json!({
        "attributes": ["cheater"],
        "steamid": "[U:1:22202]"
    }))
    .unwrap();
    assert_eq!(numeric.steam_id, text.steam_id);
    assert_eq!(numeric.steam_id, SteamId::from_account_id(22202));
}

#[test]
fn player_accepts_capitalised_attributes_key() {
    let player: PlayerDefinition = serde_json::from_value(json!({
        "Attributes": ["bot"],
        "steamid": "76561197960287930"
    }))
    .unwrap();
    assert_eq!(player.attributes, vec!["bot".to_string()]);
}

#[test]
fn player_with_invalid_id_is_rejected() {
    let result = serde_json::from_value::<PlayerDefinition>(json!({
        "attributes": ["cheater"],
        "steamid": "not an id"
    }));
    assert!(result.is_err());
}

#[test]
fn player_with_invalid_but_well_formed_id_parses() {
    let player: PlayerDefinition = serde_json::from_value(json!({
        "attributes": ["cheater"],
        "steamid": "[U:1:0]"
    }))
    .unwrap();
    assert!(!player.steam_id.is_valid());
}

#[test]
fn player_last_seen_is_unix_seconds() {
    let player: PlayerDefinition = serde_json::from_value(json!({
        "attributes": ["cheater"],
        "last_seen": {"player_name": "Bot (1)", "time": 1700000000},
        "steamid": "76561197960287930",
        "proof": ["demo 12"]
    }))
    .unwrap();
    assert_eq!(
        player.last_seen,
        LastSeen::new("Bot (1)", Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    );
    assert_eq!(player.proof, vec!["demo 12".to_string()]);

    let value = serde_json::to_value(&player).unwrap();
    assert_eq!(value["last_seen"]["time"], json!(1_700_000_000));
    assert_eq!(value["steamid"], json!("76561197960287930"));
}

#[test]
fn player_missing_last_seen_defaults_to_epoch() {
    let player: PlayerDefinition =
        serde_json::from_value(json!({"steamid": "76561197960287930"})).unwrap();
    assert_eq!(player.last_seen.time.timestamp(), 0);
    assert!(player.last_seen.player_name.is_empty());
    assert!(player.attributes.is_empty());
}

#[test]
fn player_builders() {
    let id = SteamId::from_account_id(7);
    let player = PlayerDefinition::new(id, vec!["bot".to_string()])
        .with_last_seen(LastSeen::now("someone"))
        .with_proof(vec!["clip".to_string()]);
    assert_eq!(player.steam_id, id);
    assert_eq!(player.last_seen.player_name, "someone");
    assert!(player.last_seen.time.timestamp() > 0);
    assert_eq!(player.proof.len(), 1);
}
