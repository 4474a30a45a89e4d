use duelstats_cli::models::{validate_records, FirstMove, MatchRecord, Outcome, RawMatchRecord};

#[test]
fn decode_and_validate_season_records() {
    let json = serde_json::json!([
        {
            "my_deck": "Sky Striker",
            "op_deck": "Dragon Link",
            "first_move": "first",
            "match_res": "win",
            "coin_res": "win",
            "notes": ""
        },
        {
            "my_deck": "Sky Striker",
            "op_deck": "Branded",
            "first_move": "second",
            "match_res": "lose",
            "coin_res": "lose"
        }
    ]);

    let raw: Vec<RawMatchRecord> = serde_json::from_value(json).expect("decode");
    let records = validate_records(raw).expect("validate");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].my_deck, "Sky Striker");
    assert_eq!(records[0].first_move, FirstMove::First);
    assert_eq!(records[0].match_res, Outcome::Win);
    assert_eq!(records[1].op_deck, "Branded");
    assert_eq!(records[1].coin_res, Outcome::Lose);
    assert_eq!(records[1].notes, None);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let json = serde_json::json!([
        {
            "my_deck": "Labrynth",
            "op_deck": "Kashtira",
            "first_move": " first ",
            "match_res": "win",
            "coin_res": " lose"
        }
    ]);

    let raw: Vec<RawMatchRecord> = serde_json::from_value(json).unwrap();
    let records = validate_records(raw).expect("validate");
    assert_eq!(records[0].first_move, FirstMove::First);
    assert_eq!(records[0].coin_res, Outcome::Lose);
}

#[test]
fn missing_field_reports_index_and_field() {
    let json = serde_json::json!([
        {
            "my_deck": "Labrynth",
            "op_deck": "Kashtira",
            "first_move": "first",
            "match_res": "win",
            "coin_res": "win"
        },
        {
            "my_deck": "Labrynth",
            "first_move": "second",
            "match_res": "lose",
            "coin_res": "lose"
        }
    ]);

    let raw: Vec<RawMatchRecord> = serde_json::from_value(json).unwrap();
    let err = validate_records(raw).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("record 1"), "got: {msg}");
    assert!(msg.contains("op_deck"), "got: {msg}");
}

#[test]
fn empty_string_counts_as_missing() {
    let json = serde_json::json!([
        {
            "my_deck": "   ",
            "op_deck": "Kashtira",
            "first_move": "first",
            "match_res": "win",
            "coin_res": "win"
        }
    ]);

    let raw: Vec<RawMatchRecord> = serde_json::from_value(json).unwrap();
    let err = validate_records(raw).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("record 0"), "got: {msg}");
    assert!(msg.contains("my_deck"), "got: {msg}");
}

#[test]
fn unknown_enum_value_is_rejected_not_coerced() {
    let json = serde_json::json!([
        {
            "my_deck": "Labrynth",
            "op_deck": "Kashtira",
            "first_move": "first",
            "match_res": "draw",
            "coin_res": "win"
        }
    ]);

    let raw: Vec<RawMatchRecord> = serde_json::from_value(json).unwrap();
    let err = validate_records(raw).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("record 0"), "got: {msg}");
    assert!(msg.contains("match_res"), "got: {msg}");
    assert!(msg.contains("draw"), "got: {msg}");
}

#[test]
fn validated_record_roundtrips_as_json() {
    let record = MatchRecord {
        my_deck: "Tearlaments".into(),
        op_deck: "Spright".into(),
        first_move: FirstMove::Second,
        match_res: Outcome::Win,
        coin_res: Outcome::Lose,
        notes: Some("went second on purpose".into()),
    };

    let text = serde_json::to_string(&record).unwrap();
    let back: MatchRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(record, back);
}
