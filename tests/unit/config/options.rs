use super::*;

#[test]
fn defaults_match_documented_table() {
    let cfg = HanoiConfig::default();
    assert_eq!(cfg.layers, 3);
    assert_eq!(cfg.duration, 60);
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.scaling, 1);
    assert_eq!(cfg.force_first, 1);
    assert_eq!(cfg.force_last, 1);
    assert!(!cfg.counter_display);
    assert!(!cfg.counter_render);
    assert_eq!(cfg.counter_size, 50);
    assert_eq!(cfg.counter_font, "Arial");
}

#[test]
fn pairs_override_defaults() {
    let cfg = HanoiConfig::from_pairs([
        "layers=10",
        "duration=5",
        "fps=24",
        "scaling=2",
        "counter_display=true",
        "counter_font=DejaVu Sans",
    ]);
    assert_eq!(cfg.layers, 10);
    assert_eq!(cfg.duration, 5);
    assert_eq!(cfg.fps, 24);
    assert_eq!(cfg.scaling, 2);
    assert!(cfg.counter_display);
    assert!(!cfg.counter_render);
    assert_eq!(cfg.counter_font, "DejaVu Sans");
    assert_eq!(cfg.natural_frames(), 120);
    assert_eq!(cfg.counter_px(), 100);
}

#[test]
fn force_options_populate_their_own_fields() {
    let cfg = HanoiConfig::from_pairs(["forcefirst=4", "forcelast=9"]);
    assert_eq!(cfg.force_first, 4);
    assert_eq!(cfg.force_last, 9);

    let cfg = HanoiConfig::from_pairs(["force_first=2", "force_last=0"]);
    assert_eq!(cfg.force_first, 2);
    assert_eq!(cfg.force_last, 0);
}

#[test]
fn malformed_numbers_fall_back_silently() {
    let cfg = HanoiConfig::from_pairs([
        "layers=abc",
        "duration=",
        "fps=0",
        "scaling=-2",
        "forcefirst=x",
        "counter_size=99999999999",
    ]);
    let d = HanoiConfig::default();
    assert_eq!(cfg.layers, d.layers);
    assert_eq!(cfg.duration, d.duration);
    assert_eq!(cfg.fps, d.fps);
    assert_eq!(cfg.scaling, d.scaling);
    assert_eq!(cfg.force_first, d.force_first);
    assert_eq!(cfg.counter_size, d.counter_size);
}

#[test]
fn numeric_prefix_is_taken() {
    let cfg = HanoiConfig::from_pairs(["layers=12px", "fps=+25", "duration=3.9"]);
    assert_eq!(cfg.layers, 12);
    assert_eq!(cfg.fps, 25);
    assert_eq!(cfg.duration, 3);
}

#[test]
fn booleans_and_bare_keys() {
    let cfg = HanoiConfig::from_pairs(["counter_display", "counter_render=TRUE"]);
    assert!(cfg.counter_display);
    assert!(cfg.counter_render);

    let cfg = HanoiConfig::from_pairs(["counter_display=yes", "counter_render=1"]);
    assert!(!cfg.counter_display);
    assert!(!cfg.counter_render);
}

#[test]
fn unknown_keys_are_ignored() {
    let cfg = HanoiConfig::from_pairs(["colour=red", "layers=4"]);
    assert_eq!(cfg.layers, 4);
}

#[test]
fn later_tokens_win() {
    let cfg = HanoiConfig::from_pairs(["layers=4", "layers=6"]);
    assert_eq!(cfg.layers, 6);
}

#[test]
fn total_moves_grows_as_power_of_two() {
    assert_eq!(total_moves(1), 1);
    assert_eq!(total_moves(3), 7);
    assert_eq!(total_moves(10), 1023);
    assert_eq!(total_moves(63), (1u64 << 63) - 1);
    assert_eq!(total_moves(64), u64::MAX);
}

#[test]
fn validate_rejects_unrepresentable_values() {
    assert!(HanoiConfig::default().validate().is_ok());

    let cfg = HanoiConfig {
        layers: 64,
        ..HanoiConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(HanoiError::Validation(_))));

    let cfg = HanoiConfig {
        scaling: 1000,
        ..HanoiConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(HanoiError::Validation(_))));
}

#[test]
fn json_round_trips_with_partial_fields() {
    let dir = std::path::PathBuf::from("target").join("unit_config_json");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("partial.json");
    std::fs::write(&path, r#"{ "layers": 8, "counter_render": true }"#).unwrap();

    let cfg = HanoiConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.layers, 8);
    assert!(cfg.counter_render);
    assert_eq!(cfg.fps, 30);
}

#[test]
fn missing_json_file_is_an_error() {
    let err = HanoiConfig::from_json_file(std::path::Path::new("target/does/not/exist.json"))
        .unwrap_err();
    assert!(err.to_string().contains("open config"));
}

#[test]
fn schedule_carries_derived_values() {
    let cfg = HanoiConfig::from_pairs(["layers=4", "duration=2", "fps=5", "forcelast=3"]);
    let s = cfg.schedule();
    assert_eq!(s.total_moves, 15);
    assert_eq!(s.natural_frames, 10);
    assert_eq!(s.force_first, 1);
    assert_eq!(s.force_last, 3);
}
