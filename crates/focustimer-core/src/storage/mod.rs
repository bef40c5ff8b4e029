mod config;
pub mod database;
pub(crate) mod json_path;
mod memory;

pub use config::Config;
pub use database::Database;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::StoreError;

/// Keys used in the persisted key-value store.
pub mod keys {
    pub const SETTINGS: &str = "settings";
    pub const SESSION_COUNT: &str = "session-count";
    pub const CURRENT_WORK_DURATION: &str = "current-work-duration";
    pub const CURRENT_BREAK_DURATION: &str = "current-break-duration";
    pub const FOCUS_HISTORY: &str = "focus-history";
    pub const TOTAL_FOCUS_TIME: &str = "total-focus-time";
    /// Full engine snapshot, so a restarted process resumes where it stopped.
    pub const TIMER_STATE: &str = "timer-state";
}

/// Persisted string key-value store.
///
/// Values are JSON documents; use [`load_or`] and [`persist`] for typed
/// access.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Read and decode `key`, falling back to `default` when the key is missing
/// or unreadable.
pub fn load_or<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable stored value");
            default
        }
    }
}

/// Read and decode `key`.
///
/// # Errors
/// Returns an error if the store fails or the stored JSON does not decode.
pub fn try_load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encode and write `value` under `key`.
///
/// # Errors
/// Returns an error if encoding or the write fails.
pub fn persist<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Returns the data directory, creating it if needed.
///
/// `FOCUSTIMER_DATA_DIR` wins when set. Otherwise `~/.config/focustimer[-dev]/`
/// based on `FOCUSTIMER_ENV` (set it to `dev` for a separate development
/// directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("FOCUSTIMER_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("FOCUSTIMER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("focustimer-dev")
            } else {
                base_dir.join("focustimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
