use pacer_core::config::*;
use pacer_core::errors::ConfigError;
use pacer_core::registry::SignalKind;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = PacerConfig::from_toml("").unwrap();

    // Intake defaults
    assert_eq!(config.intake.cooldown_ms, 1_000);
    assert_eq!(config.intake.settle_ms, 100);
    assert_eq!(config.intake.backlog_capacity, 10);

    // Safety defaults
    assert_eq!(config.safety.max_admissions_per_window, 10);
    assert_eq!(config.safety.window_secs, 60);
    assert_eq!(config.safety.min_spacing_ms, 1_000);
    assert_eq!(config.safety.max_duration_ms, 5_000);

    // Registry defaults
    assert_eq!(config.registry.default_duration_ms, 3_000);
    assert!(config.registry.targets.is_empty());
    assert_eq!(config.registry.patterns.len(), 5);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[intake]
cooldown_ms = 250
backlog_capacity = 4

[safety]
max_duration_ms = 8000
"#;
    let config = PacerConfig::from_toml(toml).unwrap();
    assert_eq!(config.intake.cooldown_ms, 250);
    assert_eq!(config.intake.backlog_capacity, 4);
    // Non-overridden fields keep defaults
    assert_eq!(config.intake.settle_ms, 100);
    assert_eq!(config.safety.max_duration_ms, 8_000);
    assert_eq!(config.safety.window_secs, 60);
}

#[test]
fn custom_patterns_replace_the_default_table() {
    let toml = r#"
[registry]
default_duration_ms = 2000
targets = ["tile-0", "tile-1"]

[[registry.patterns]]
name = "calm-down"
signal = "hover-repeat"
response = "gentle-fade"
"#;
    let config = PacerConfig::from_toml(toml).unwrap();
    assert_eq!(config.registry.patterns.len(), 1);
    let pattern = &config.registry.patterns[0];
    assert_eq!(pattern.signal, SignalKind::HoverRepeat);
    assert_eq!(pattern.priority, None);
    assert_eq!(pattern.duration_ms, None);
    assert_eq!(config.registry.targets, vec!["tile-0", "tile-1"]);
}

#[test]
fn unknown_signal_in_pattern_is_a_parse_error() {
    let toml = r#"
[[registry.patterns]]
name = "bogus"
signal = "scroll-storm"
response = "shake"
"#;
    let err = PacerConfig::from_toml(toml).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn zero_capacity_fails_validation() {
    let err = PacerConfig::from_toml("[intake]\nbacklog_capacity = 0\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "intake.backlog_capacity")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn oversized_settle_window_fails_validation() {
    let toml = "[intake]\ncooldown_ms = 100\nsettle_ms = 5000\n";
    let err = PacerConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("intake.settle_ms"));
}

#[test]
fn zero_rate_window_fails_validation() {
    assert!(PacerConfig::from_toml("[safety]\nwindow_secs = 0\n").is_err());
    assert!(PacerConfig::from_toml("[safety]\nmax_admissions_per_window = 0\n").is_err());
}

#[test]
fn empty_pattern_name_fails_validation() {
    let toml = r#"
[[registry.patterns]]
name = "  "
signal = "dwell"
response = "pulse-relevant"
"#;
    let err = PacerConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("dwell"));
}

#[test]
fn load_reads_file_and_reports_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pacer.toml");
    std::fs::write(&path, "[intake]\nsettle_ms = 50\n").unwrap();
    let config = PacerConfig::load(&path).unwrap();
    assert_eq!(config.intake.settle_ms, 50);

    let missing = dir.path().join("absent.toml");
    let err = PacerConfig::load(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn config_round_trips_through_toml() {
    let config = PacerConfig::default();
    let text = toml::to_string(&config).unwrap();
    let back = PacerConfig::from_toml(&text).unwrap();
    assert_eq!(back.registry.patterns, config.registry.patterns);
    assert_eq!(back.intake.cooldown_ms, config.intake.cooldown_ms);
}
