use std::fs;

use bloom::GameConfig;

#[test]
fn later_layers_override_single_fields() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("game.ron");
    let local = dir.path().join("game.local.ron");
    let missing = dir.path().join("nope.ron");
    fs::write(&base, "(blooms: (max_live: 10, spawn_interval: 3.0))").unwrap();
    fs::write(&local, "(blooms: (max_live: 20))").unwrap();

    let (cfg, used, errors) = GameConfig::load_layered([&base, &missing, &local]);
    assert_eq!(cfg.blooms.max_live, 20);
    assert_eq!(cfg.blooms.spawn_interval, 3.0);
    assert_eq!(cfg.flower.max_health, GameConfig::default().flower.max_health);
    assert_eq!(used.len(), 2);
    assert_eq!(errors.len(), 1);
}

#[test]
fn shipped_config_matches_defaults_and_validates() {
    let cfg = GameConfig::load_from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config/game.ron"))
        .expect("shipped config parses");
    assert_eq!(cfg.blooms, GameConfig::default().blooms);
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn invalid_values_are_reported() {
    let mut cfg = GameConfig::default();
    cfg.blooms.cut_min_frame = 9;
    cfg.audio.volume = 3.0;
    let warnings = cfg.validate();
    assert!(warnings.len() >= 2, "{warnings:?}");
}
