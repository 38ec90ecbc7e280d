//! Core error types for setflow-core.
//!
//! Malformed workout fields (unparseable set counts, durations, rest values)
//! are never errors: they are coerced to safe defaults at the flattener
//! boundary. The variants here cover the file/config edges only.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for setflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Workout document not found on disk
    #[error("Workout not found: {path}")]
    WorkoutNotFound { path: PathBuf },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Platform capability failure (wake lock, audio). Callers treat these
    /// as non-fatal and log them.
    #[error("Platform error: {0}")]
    Platform(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Config directory could not be determined or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
