use duelstats_cli::aggregate::analyze_season;
use duelstats_cli::store::{self, StoreError};
use std::fs;
use std::path::PathBuf;

fn temp_data_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("duelstats-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("json")).unwrap();
    dir
}

fn write_season(dir: &PathBuf, season: u32, body: &serde_json::Value) {
    let path = store::season_path(dir, season);
    fs::write(path, serde_json::to_string_pretty(body).unwrap()).unwrap();
}

#[test]
fn season_roundtrips_through_files() {
    let dir = temp_data_dir("roundtrip");
    write_season(
        &dir,
        21,
        &serde_json::json!([
            {"my_deck": "A", "op_deck": "X", "first_move": "first", "match_res": "win", "coin_res": "win"},
            {"my_deck": "A", "op_deck": "Y", "first_move": "second", "match_res": "lose", "coin_res": "lose"},
            {"my_deck": "B", "op_deck": "X", "first_move": "first", "match_res": "win", "coin_res": "lose"}
        ]),
    );

    let records = store::load_season(&store::season_path(&dir, 21)).expect("load");
    assert_eq!(records.len(), 3);

    let stats = analyze_season(&records);
    let out = store::stats_path(&dir, 21);
    store::save_stats(&out, &stats).expect("save");

    let found = store::discover_stats(&dir.join("stats")).expect("discover");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, 21);

    let loaded = store::load_stats(&found[0].1).expect("reload");
    assert_eq!(loaded, stats);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_season_file_is_distinguishable() {
    let dir = temp_data_dir("missing");
    let err = store::load_season(&store::season_path(&dir, 99)).unwrap_err();
    assert!(matches!(err, StoreError::Missing(_)));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_record_fails_the_whole_season() {
    let dir = temp_data_dir("malformed");
    write_season(
        &dir,
        5,
        &serde_json::json!([
            {"my_deck": "A", "op_deck": "X", "first_move": "first", "match_res": "win", "coin_res": "win"},
            {"my_deck": "A", "op_deck": "Y", "first_move": "first", "match_res": "win", "coin_res": "heads"}
        ]),
    );

    let err = store::load_season(&store::season_path(&dir, 5)).unwrap_err();
    let msg = err.to_string();
    assert!(matches!(err, StoreError::Invalid { .. }));
    assert!(msg.contains("record 1"), "got: {msg}");
    assert!(msg.contains("coin_res"), "got: {msg}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn discovery_sorts_by_season_number() {
    let dir = temp_data_dir("discover");
    let empty = analyze_season(&[]);
    for season in [3u32, 21, 1] {
        store::save_stats(&store::stats_path(&dir, season), &empty).unwrap();
    }
    // a stray file that does not match the artifact pattern is ignored
    fs::write(dir.join("stats").join("notes.txt"), "x").unwrap();

    let found = store::discover_stats(&dir.join("stats")).expect("discover");
    let seasons: Vec<u32> = found.iter().map(|(s, _)| *s).collect();
    assert_eq!(seasons, vec![1, 3, 21]);

    let _ = fs::remove_dir_all(&dir);
}
