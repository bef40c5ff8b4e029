//! SQLite-backed key-value store.
//!
//! All timer state, settings and focus history are stored as JSON values in a
//! single `kv` table, mirroring the keys listed in [`super::keys`].

use rusqlite::{params, Connection};
use std::path::Path;

use super::{data_dir, KeyValueStore};
use crate::error::StoreError;

/// Default database file name inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "focustimer.db";

/// SQLite database for persisted timer state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open `file_name` inside the data directory.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(file_name: &str) -> Result<Self, StoreError> {
        let path = data_dir()?.join(file_name);
        Self::open_path(&path)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_path(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.kv_get(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.kv_set(key, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn set_replaces_existing_value() {
        let db = Database::open_memory().unwrap();
        db.set("session-count", "1").unwrap();
        db.set("session-count", "2").unwrap();
        assert_eq!(db.get("session-count").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("focustimer.db");
        {
            let db = Database::open_path(&path).unwrap();
            db.set("total-focus-time", "50").unwrap();
        }
        let db = Database::open_path(&path).unwrap();
        assert_eq!(db.get("total-focus-time").unwrap().as_deref(), Some("50"));
    }
}
