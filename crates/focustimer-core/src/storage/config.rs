//! TOML-based application configuration.
//!
//! Holds runtime options that are not timer settings:
//! - Delay before a finished interval switches to the next mode
//! - Default log filter for the CLI
//! - Database file name inside the data directory
//!
//! Configuration is stored at `~/.config/focustimer/config.toml`. Timer
//! settings (durations, auto-start flags) live in the key-value store instead;
//! see [`crate::Settings`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::database::DEFAULT_DATABASE_FILE;
use super::{data_dir, json_path};
use crate::error::ConfigError;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focustimer/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How long the completion state lingers before the mode switch.
    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,
    /// `tracing` filter used when `FOCUSTIMER_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

fn default_completion_delay_ms() -> u64 {
    1000
}
fn default_log_filter() -> String {
    "warn".into()
}
fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completion_delay_ms: default_completion_delay_ms(),
            log_filter: default_log_filter(),
            database_file: default_database_file(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        json_path::get(&json, key).map(json_path::display)
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        json_path::set(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
