//! Integration tests for layered Settings loading

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use alloctree::application::ApplicationError;
use alloctree::config::Settings;

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alloctree.toml");
    let data_dir = dir.path().join("store");
    fs::write(
        &path,
        format!(
            "data_dir = {:?}\ncurrency_symbol = \"€\"\nchart_title = \"Mix\"\n",
            data_dir.to_string_lossy()
        ),
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert_eq!(settings.data_dir, data_dir);
    assert_eq!(settings.currency_symbol, "€");
    assert_eq!(settings.chart_title, "Mix");
    assert_eq!(settings.presenter().currency(), "€");
}

#[test]
fn given_tilde_data_dir_when_load_then_expands_home() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alloctree.toml");
    fs::write(&path, "data_dir = \"~/alloctree-data\"\n").unwrap();

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    let home = PathBuf::from(std::env::var("HOME").expect("HOME should be set"));
    assert_eq!(settings.data_dir, home.join("alloctree-data"));
}

#[test]
fn given_template_as_config_when_load_then_behaves_like_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alloctree.toml");
    fs::write(&path, Settings::template()).unwrap();

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert!(!settings.live_key.is_empty());
    assert_ne!(settings.live_key, settings.backup_key);
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(dir.path().join("absent.toml").as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_settings_when_shown_as_toml_then_parses_back() {
    let settings = Settings::default();

    let rendered = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&rendered).unwrap();

    assert_eq!(parsed, settings);
}
