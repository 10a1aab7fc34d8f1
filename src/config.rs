//! User settings and on-disk locations.
//!
//! Settings live in a plain `key = value` file resolved from the user's
//! config directory. A missing or partial file falls back to defaults; an
//! unknown key is ignored so older files keep working.

use std::env;
use std::path::{Path, PathBuf};

use crate::state::SortDirection;

/// Resolved user settings.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Catalog service root URL.
    pub api_base_url: String,
    /// Base location product image paths are resolved against.
    pub media_base_url: String,
    /// Default price directive applied at startup.
    pub sort_price: Option<SortDirection>,
    /// Default name directive applied at startup.
    pub sort_name: Option<SortDirection>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5001".to_string(),
            media_base_url: "http://localhost:5001".to_string(),
            sort_price: None,
            sort_name: None,
        }
    }
}

/// Determine the configuration file path for Vitrina's SETTINGS, searching in
/// priority order: `$HOME/.config/vitrina` then `$XDG_CONFIG_HOME/vitrina`.
fn resolve_settings_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok();
    let xdg_config = env::var("XDG_CONFIG_HOME").ok();
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(h) = home.as_deref() {
        candidates.push(Path::new(h).join(".config").join("vitrina").join("settings.conf"));
    }
    if let Some(xdg) = xdg_config.as_deref() {
        candidates.push(Path::new(xdg).join("vitrina").join("settings.conf"));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// What: Load settings from the resolved config file, or defaults.
///
/// Output:
/// - A fully populated [`Settings`]; never fails. Unreadable files degrade to
///   defaults with a warning.
pub fn settings() -> Settings {
    resolve_settings_path().map_or_else(Settings::default, |path| load_settings_from(&path))
}

/// Read and parse one settings file; unreadable content yields defaults.
fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_settings(&text),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
            Settings::default()
        }
    }
}

/// Parse `key = value` lines. `#` starts a comment; unknown keys are ignored.
fn parse_settings(text: &str) -> Settings {
    let mut out = Settings::default();
    for line in text.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        match key.as_str() {
            "api_base_url" if !value.is_empty() => out.api_base_url = value.to_string(),
            "media_base_url" if !value.is_empty() => out.media_base_url = value.to_string(),
            "sort_price" => out.sort_price = SortDirection::from_config_key(value),
            "sort_name" => out.sort_name = SortDirection::from_config_key(value),
            _ => {}
        }
    }
    out
}

/// Vitrina's config directory (`~/.config/vitrina`), created on first use.
pub fn config_dir() -> PathBuf {
    let base = env::var("XDG_CONFIG_HOME").map_or_else(
        |_| {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            Path::new(&home).join(".config")
        },
        PathBuf::from,
    );
    let dir = base.join("vitrina");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Log directory under the config directory, created on first use.
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
