use std::path::PathBuf;

use jcaster::config::{Settings, WindowMode};
use jcaster::error::{ConfigError, MapError};
use jcaster::level::Level;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("jcaster-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[test]
fn partial_json_overrides_only_named_fields() {
    let s = Settings::from_json_str(r#"{ "width": 800, "enemies": 3, "window_mode": "borderless" }"#).unwrap();
    assert_eq!(s.width, 800);
    assert_eq!(s.enemies, 3);
    assert_eq!(s.window_mode, WindowMode::Borderless);
    assert_eq!(s.height, Settings::default().height);
    assert_eq!(s.player_max_health, 100);
}

#[test]
fn empty_object_is_the_defaults() {
    assert_eq!(Settings::from_json_str("{}").unwrap(), Settings::default());
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(Settings::from_json_str("{ width: }"), Err(ConfigError::Json(_))));
}

#[test]
fn out_of_range_values_are_rejected() {
    for json in [
        r#"{ "fov": 4.0 }"#,
        r#"{ "ray_scale": 0 }"#,
        r#"{ "player_radius": 0.6 }"#,
        r#"{ "path_interval": 0.0 }"#,
        r#"{ "max_depth": -1.0 }"#,
    ] {
        assert!(
            matches!(Settings::from_json_str(json), Err(ConfigError::Invalid { .. })),
            "{json} should be invalid"
        );
    }
}

#[test]
fn settings_file_round_trip() {
    let path = scratch_file("settings.json", r#"{ "seed": 99, "target_ups": 30 }"#);
    let s = Settings::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(s.seed, Some(99));
    assert_eq!(s.target_ups, 30);
}

#[test]
fn missing_settings_file_is_an_io_error() {
    let err = Settings::load("/nonexistent/jcaster/settings.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("settings.json"));
}

// ── Levels ───────────────────────────────────────────────────────────────────

#[test]
fn level_file_is_parsed() {
    let path = scratch_file("level.txt", "11111\n1P.c1\n11111\n\n");
    let level = Level::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!((level.map.cols(), level.map.rows()), (5, 3));
    assert_eq!(level.npcs.len(), 1);
}

#[test]
fn malformed_level_file_surfaces_map_error() {
    let path = scratch_file("bad-level.txt", "111\n1.\n111\n");
    let err = Level::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::Map(MapError::RaggedRow { row: 1, .. })));
}

#[test]
fn built_in_level_is_playable() {
    let level = Level::default_level();
    let start = level.player_start.expect("built-in level places the player");
    assert!(level.validate(start).is_ok());
    assert!(level.npcs.iter().all(|(_, p)| level.map.is_free(jcaster::geometry::cell_of(*p))));
}
