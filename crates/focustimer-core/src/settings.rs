//! User-configured durations and behavior flags.
//!
//! Settings are persisted in the key-value store under the `settings` key as
//! JSON. They change only through explicit user edits; the timer engine reads
//! them but never writes them.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};
use crate::storage::json_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Work interval length in minutes.
    #[serde(default = "default_work_duration")]
    pub work_duration: u32,
    #[serde(default = "default_short_break")]
    pub short_break_duration: u32,
    #[serde(default = "default_long_break")]
    pub long_break_duration: u32,
    /// Every n-th completed work session is followed by a long break.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Start the next work interval automatically when a break ends.
    #[serde(default)]
    pub auto_start_next: bool,
    /// Start the break automatically when a work interval ends.
    #[serde(default)]
    pub auto_start_break: bool,
}

fn default_work_duration() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            short_break_duration: default_short_break(),
            long_break_duration: default_long_break(),
            long_break_interval: default_long_break_interval(),
            sound_enabled: true,
            auto_start_next: false,
            auto_start_break: false,
        }
    }
}

impl Settings {
    /// Check the duration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first field that is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let durations = [
            ("workDuration", self.work_duration),
            ("shortBreakDuration", self.short_break_duration),
            ("longBreakDuration", self.long_break_duration),
        ];
        for (field, value) in durations {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: "duration must be at least 1 minute".into(),
                });
            }
        }
        if self.long_break_interval < 2 {
            return Err(ValidationError::InvalidValue {
                field: "longBreakInterval".to_string(),
                message: format!("must be at least 2, got {}", self.long_break_interval),
            });
        }
        Ok(())
    }

    /// Get a setting as string by key (e.g. `workDuration`).
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        json_path::get(&json, key).map(json_path::display)
    }

    /// Return a copy with one key changed. `self` is untouched on error.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not parse as
    /// the field's type, or the result breaks a duration invariant.
    pub fn with_value(&self, key: &str, value: &str) -> Result<Self, ConfigError> {
        let mut json =
            serde_json::to_value(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        json_path::set(&mut json, key, value)?;
        let updated: Settings =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        Ok(updated)
    }
}
