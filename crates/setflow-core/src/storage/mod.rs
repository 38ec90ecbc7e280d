mod config;

pub use config::{Config, CuesConfig, PlayerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/setflow[-dev]/` based on SETFLOW_ENV.
///
/// Set SETFLOW_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SETFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("setflow-dev")
    } else {
        base_dir.join("setflow")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}
