//! Integration tests for ConfigManager and document loading
//!
//! These tests verify:
//! - Settings loading from YAML, with defaults for missing keys
//! - Settings round trip through YAML
//! - Loading Hide My Applist documents from disk

use camino::Utf8PathBuf;
use hma_rewriter::ConfigManager;
use hma_rewriter::config::{SETTINGS_FILE_NAME, load_document, to_yaml};
use hma_rewriter::models::RewriterSettings;
use std::fs;
use tempfile::TempDir;

fn create_test_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, dir)
}

#[test]
fn test_missing_settings_file_has_no_source() {
    let (_temp_dir, dir) = create_test_dir();
    let manager = ConfigManager::new(dir.join(SETTINGS_FILE_NAME));

    assert!(manager.settings_source().is_none());
    assert_eq!(manager.load_settings().unwrap(), RewriterSettings::default());
}

#[test]
fn test_partial_settings_file() {
    let (_temp_dir, dir) = create_test_dir();
    let path = dir.join("custom.yaml");
    fs::write(
        &path,
        r#"
default_whitelist: games
template:
  exclude_system_apps: false
  apply_settings_presets:
    - dev_options
logging:
  level: info
"#,
    )
    .unwrap();

    let settings = ConfigManager::new(&path).load_settings().unwrap();

    assert_eq!(settings.default_whitelist, "games");
    assert!(!settings.template.exclude_system_apps);
    assert!(settings.template.use_whitelist);
    assert_eq!(settings.template.apply_settings_presets, vec!["dev_options"]);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.prefix, "hma-rewriter");
}

#[test]
fn test_invalid_settings_file() {
    let (_temp_dir, dir) = create_test_dir();
    let path = dir.join("broken.yaml");
    fs::write(&path, "default_whitelist: [unclosed\n").unwrap();

    assert!(ConfigManager::new(&path).load_settings().is_err());
}

#[test]
fn test_yaml_round_trip() {
    let (_temp_dir, dir) = create_test_dir();
    let manager = ConfigManager::new(dir.join(SETTINGS_FILE_NAME));

    let mut settings = RewriterSettings::default();
    settings.logging.dir = Some("logs".to_string());
    manager.save_settings(&settings).unwrap();

    let saved = fs::read_to_string(manager.settings_path()).unwrap();
    assert_eq!(saved, to_yaml(&settings).unwrap());
    assert_eq!(manager.settings_source(), Some(manager.settings_path()));
    assert_eq!(manager.load_settings().unwrap(), settings);
}

#[test]
fn test_load_document_from_disk() {
    let (_temp_dir, dir) = create_test_dir();
    let path = dir.join("config.json");
    fs::write(
        &path,
        r#"{"configVersion": 90, "templates": {"cnapps": {"isWhitelist": true, "appList": ["A"]}}, "scope": {}}"#,
    )
    .unwrap();

    let document = load_document(&path).unwrap();

    assert!(document.templates["cnapps"].is_whitelist);
    assert!(document.scope.is_empty());
    assert_eq!(document.extra["configVersion"], 90);
}
