mod common;

use std::io::Write;

use alien_raid::assets::{self, AssetTable};
use alien_raid::config::GameConfig;
use alien_raid::error::Error;

use common::TableAssets;

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_match_the_classic_tuning() {
    let c = GameConfig::default();
    assert_eq!(c.fps, 60);
    assert_eq!(c.player_speed, 10);
    assert_eq!(c.player_bounce, 24);
    assert_eq!(c.alien_speed, 13);
    assert_eq!(c.explosion_life, 12);
    assert_eq!(c.max_shots, 2);
    assert_eq!(c.alien_odds, 22);
    assert_eq!(c.alien_reload, 12);
    assert_eq!(c.bomb_odds, 60);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_file_keeps_defaults_for_missing_keys() {
    let file = write_config(r#"{ "alien_odds": 5, "max_shots": 4 }"#);
    let c = GameConfig::load(file.path()).unwrap();
    assert_eq!(c.alien_odds, 5);
    assert_eq!(c.max_shots, 4);
    assert_eq!(c.bomb_odds, GameConfig::default().bomb_odds);
}

#[test]
fn zero_odds_are_rejected() {
    let file = write_config(r#"{ "bomb_odds": 0 }"#);
    assert!(matches!(GameConfig::load(file.path()), Err(Error::Config(_))));
}

#[test]
fn unknown_keys_are_rejected() {
    let file = write_config(r#"{ "alien_sped": 5 }"#);
    assert!(matches!(GameConfig::load(file.path()), Err(Error::ConfigParse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = GameConfig::load(std::path::Path::new("/definitely/not/here.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

// ── Assets ────────────────────────────────────────────────────────────────────

#[test]
fn missing_asset_fails_the_table_load() {
    let mut provider = TableAssets {
        missing: Some(assets::BOMB),
        ..TableAssets::default()
    };
    match AssetTable::load(&mut provider) {
        Err(Error::Asset { name, .. }) => assert_eq!(name, assets::BOMB),
        other => panic!("expected asset error, got {other:?}"),
    }
}

#[test]
fn flipped_player_image_is_distinct() {
    let table = AssetTable::load(&mut TableAssets::default()).unwrap();
    assert_ne!(table.player[0], table.player[1]);
    assert_eq!(table.player[0].width, table.player[1].width);
}
