//! Unit tests for configuration persistence

use poemwalk::storage::config::{load_config_from, save_config_to, AppConfig, SourceKind};
use poemwalk::world::geo::Coordinate;
use poemwalk::world::navigation::EngineSettings;

#[test]
fn test_defaults_match_game_constants() {
    let config = AppConfig::default();
    assert_eq!(config.game.visibility_radius_m, 100.0);
    assert_eq!(config.game.movement_slowness, 10.0);
    assert_eq!(config.game.checkpoint_interval, 5);
    assert_eq!(config.viewport.padding, 30.0);
    assert_eq!(config.catalog.delimiter, ';');
    assert_eq!(config.catalog.sources.len(), 3);
    assert_eq!(config.catalog.sources[0].kind, SourceKind::Poem);
}

#[test]
fn test_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.game.start_override = Some(Coordinate::new(52.16583, 4.483413));
    config.game.initial_quests.push("Find the castle".to_string());
    config.server.timeout_secs = 3;
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.game, config.game);
    assert_eq!(loaded.server.timeout_secs, 3);
    assert_eq!(loaded.data_dir, dir.path());

    let settings = EngineSettings::from_config(&loaded.game, &loaded.viewport);
    assert_eq!(settings.start_override, config.game.start_override);
    assert_eq!(settings.initial_quests.len(), 2);
}

#[test]
fn test_zero_checkpoint_interval_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[game]\ncheckpoint_interval = 0\n").unwrap();

    let config = load_config_from(&path).unwrap();
    let settings = EngineSettings::from_config(&config.game, &config.viewport);
    assert_eq!(settings.checkpoint_interval, 1);
}
