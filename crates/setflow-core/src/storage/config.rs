//! TOML-based application configuration.
//!
//! Stores player preferences: audio cue behavior and whether the interactive
//! player prints the workout plan up front.
//!
//! Configuration is stored at `~/.config/setflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Audio cue configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Use the terminal bell for cues in the CLI player.
    #[serde(default = "default_true")]
    pub terminal_bell: bool,
}

/// Interactive player configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Print the flattened plan table before playing.
    #[serde(default = "default_true")]
    pub show_plan: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/setflow/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cues: CuesConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

fn default_true() -> bool {
    true
}

impl Default for CuesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            terminal_bell: true,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { show_plan: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cues: CuesConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, creating the file with defaults on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "cues.enabled" => Some(self.cues.enabled.to_string()),
            "cues.terminal_bell" => Some(self.cues.terminal_bell.to_string()),
            "player.show_plan" => Some(self.player.show_plan.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key. The change is not persisted until
    /// [`Config::save`] is called.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parsed = value
            .parse::<bool>()
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}' as bool"),
            });
        match key {
            "cues.enabled" => self.cues.enabled = parsed?,
            "cues.terminal_bell" => self.cues.terminal_bell = parsed?,
            "player.show_plan" => self.player.show_plan = parsed?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
