use super::data::{Config, Overrides, Settings};
use super::io::ConfigError;
use crate::core::constants::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::collections::HashMap;
use tempfile::TempDir;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.set_key("default-model", "gemini-1.5-pro").unwrap();
    config.set_key("theme", "Light").unwrap();
    config.save_to_path(&config_path).expect("save failed");

    let loaded = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(loaded.default_model.as_deref(), Some("gemini-1.5-pro"));
    assert_eq!(loaded.theme.as_deref(), Some("light"));

    let mut loaded = loaded;
    loaded.unset_key("default-model").unwrap();
    loaded.save_to_path(&config_path).expect("second save failed");

    let reloaded = Config::load_from_path(&config_path).expect("reload failed");
    assert_eq!(reloaded.default_model, None);
    assert_eq!(reloaded.theme.as_deref(), Some("light"));
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "default_model = [unterminated").unwrap();

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at "));
}

#[test]
fn set_key_rejects_unknown_keys_and_themes() {
    let mut config = Config::default();
    assert!(config.set_key("default-provider", "x").is_err());
    assert!(config.set_key("theme", "dracula").is_err());
    assert!(config.set_key("default-model", "   ").is_err());
    assert!(config.unset_key("nope").is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn settings_fall_back_to_defaults() {
    let settings = Settings::resolve_with_env(&Config::default(), &Overrides::default(), env_from(&[]));

    assert_eq!(settings.model, DEFAULT_MODEL);
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.api_key, "");
    assert_eq!(settings.theme, "dark");
}

#[test]
fn settings_layer_flags_over_env_over_file() {
    let config = Config {
        default_model: Some("file-model".into()),
        base_url: Some("http://file".into()),
        theme: Some("light".into()),
    };
    let env = env_from(&[(API_KEY_ENV, " key-123 "), (BASE_URL_ENV, "http://env")]);

    let from_env = Settings::resolve_with_env(&config, &Overrides::default(), &env);
    assert_eq!(from_env.model, "file-model");
    assert_eq!(from_env.base_url, "http://env");
    assert_eq!(from_env.api_key, "key-123");
    assert_eq!(from_env.theme, "light");

    let overrides = Overrides {
        model: Some("flag-model".into()),
        base_url: Some("http://flag".into()),
        theme: Some("DARK".into()),
    };
    let from_flags = Settings::resolve_with_env(&config, &overrides, &env);
    assert_eq!(from_flags.model, "flag-model");
    assert_eq!(from_flags.base_url, "http://flag");
    assert_eq!(from_flags.theme, "dark");
}

#[test]
fn settings_debug_hides_api_key() {
    let settings = Settings::resolve_with_env(
        &Config::default(),
        &Overrides::default(),
        env_from(&[(API_KEY_ENV, "super-secret")]),
    );
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("api_key_set: true"));
}
