use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Keys accepted by `gemchat set` / `gemchat unset`.
pub const CONFIG_KEYS: [&str; 3] = ["default-model", "base-url", "theme"];

pub const THEME_NAMES: [&str; 2] = ["dark", "light"];

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Model id used when `--model` is not given (e.g., "gemini-1.5-pro")
    pub default_model: Option<String>,
    /// API root, without the `/models/...` suffix
    pub base_url: Option<String>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths under `$HOME` to `~` notation on Unix-like systems
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {key}"));
        }

        match key {
            "default-model" => self.default_model = Some(value.to_string()),
            "base-url" => self.base_url = Some(value.to_string()),
            "theme" => {
                let name = value.to_ascii_lowercase();
                if !THEME_NAMES.contains(&name.as_str()) {
                    return Err(format!(
                        "Unknown theme: {value} (expected one of: {})",
                        THEME_NAMES.join(", ")
                    ));
                }
                self.theme = Some(name);
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn unset_key(&mut self, key: &str) -> Result<(), String> {
        match key {
            "default-model" => self.default_model = None,
            "base-url" => self.base_url = None,
            "theme" => self.theme = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn print_all(&self) {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "(unset)".to_string());
        println!("Current configuration:");
        println!("  default-model: {}", show(&self.default_model));
        println!("  base-url: {}", show(&self.base_url));
        println!("  theme: {}", show(&self.theme));
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: {key} (expected one of: {})",
        CONFIG_KEYS.join(", ")
    )
}

/// Per-invocation overrides, usually from command-line flags.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub theme: Option<String>,
}

/// Effective settings after layering flags, environment, file and defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub model: String,
    pub base_url: String,
    /// Empty when no credential is configured; the API rejects the call.
    pub api_key: String,
    pub theme: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key_set", &!self.api_key.is_empty())
            .field("theme", &self.theme)
            .finish()
    }
}

impl Settings {
    pub fn resolve(config: &Config, overrides: &Overrides) -> Self {
        Self::resolve_with_env(config, overrides, |name| std::env::var(name).ok())
    }

    /// Flags win over the environment, which wins over the file.
    pub fn resolve_with_env<F>(config: &Config, overrides: &Overrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let model = non_empty(overrides.model.clone())
            .or_else(|| non_empty(config.default_model.clone()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = non_empty(overrides.base_url.clone())
            .or_else(|| non_empty(env(BASE_URL_ENV)))
            .or_else(|| non_empty(config.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api_key = non_empty(env(API_KEY_ENV)).unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("{API_KEY_ENV} is not set; requests will be rejected by the API");
        }

        let theme = non_empty(overrides.theme.clone())
            .or_else(|| non_empty(config.theme.clone()))
            .map(|name| name.to_ascii_lowercase())
            .unwrap_or_else(|| "dark".to_string());

        Self {
            model: model.trim().to_string(),
            base_url: base_url.trim().to_string(),
            api_key: api_key.trim().to_string(),
            theme,
        }
    }
}
