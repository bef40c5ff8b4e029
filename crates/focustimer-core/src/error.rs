//! Core error types for focustimer-core.
//!
//! Timer commands fail with [`TimerError`], which is always recoverable: the
//! command is rejected and the state is left as it was. Storage and
//! configuration failures have their own enums and fold into [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focustimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer command rejected
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A timer command that was not applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The command is not allowed in the current timer state.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// Minutes outside the accepted range, or text that is not a number.
    #[error("input out of range: {input} (expected {min}..={max} minutes)")]
    OutOfRangeInput { input: String, min: u32, max: u32 },
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Stored value could not be encoded or decoded
    #[error("Invalid stored value for '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Data directory could not be created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key not present in the configuration
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidValue { field, message } => {
                ConfigError::InvalidValue { key: field, message }
            }
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
