//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/quotebox/config.json`.
//!
//! ## Settings
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `theme` | `"Catppuccin Mocha"` | name of a built-in theme |
//! | `export_file` | `"quotes_export.json"` | path offered by the export prompt |
//! | `data_dir` | platform data dir | where `storage.json` and the log live |
//!
//! The `directories` crate resolves the platform-appropriate config directory.

use crate::quote::EXPORT_FILE_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// File name or path pre-filled in the export prompt.
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_theme_name() -> String {
    "Catppuccin Mocha".to_string()
}

fn default_export_file() -> String {
    EXPORT_FILE_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            export_file: default_export_file(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, falling back to `Config::default()`.
    ///
    /// The load error, if any, is handed back instead of logged: this runs
    /// before the logger is set up.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        Self::load_or_default(Self::config_path().and_then(|path| Self::load_from(&path)))
    }

    fn load_or_default(loaded: Result<Self>) -> (Self, Option<anyhow::Error>) {
        match loaded {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "quotebox")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}
