//! Loading game configuration from TOML files.

use memory_master::{GameMode, GameStatus, Timings};
use memory_master_app::GameConfig;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_config_file() {
    let file = config_file(
        r#"
default_mode = "Remember"
preview_seconds = 3
match_delay_ms = 250
mismatch_delay_ms = 750
seed = 42
"#,
    );
    let config = GameConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.default_mode(), GameMode::Remember);
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(
        config.timings(),
        Timings::new(3, Duration::from_millis(250), Duration::from_millis(750))
    );
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = config_file("");
    assert_eq!(GameConfig::from_file(file.path()).unwrap(), GameConfig::default());
}

#[test]
fn test_explicit_path_wins() {
    let file = config_file("preview_seconds = 2\n");
    let config = GameConfig::load(Some(file.path())).unwrap();
    assert_eq!(*config.preview_seconds(), 2);
}

#[test]
fn test_invalid_file_reports_parse_error() {
    let file = config_file("preview_seconds = \"soon\"\n");
    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_missing_file_reports_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_mode_names_are_exact_in_toml() {
    let file = config_file("default_mode = \"remember\"\n");
    assert!(GameConfig::from_file(file.path()).is_err());
}

#[test]
fn test_config_builds_seeded_games() {
    let config = GameConfig::default().with_seed(Some(7));
    let mut first = config.new_game();
    let mut second = config.new_game();
    first.start_new_game(Some(GameMode::Classic));
    second.start_new_game(Some(GameMode::Classic));
    assert_eq!(first.snapshot().cards, second.snapshot().cards);
    assert_eq!(first.status(), GameStatus::Playing);
}
