//! SQLite-backed key-value storage.
//!
//! Lists are stored JSON-encoded in a single `kv` table, one row per key.
//! The same table holds other host state (such as the serialized timer) via
//! [`Database::kv_get`] and [`Database::kv_set`].

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{data_dir, PersistenceAdapter};
use crate::error::{CoreError, StorageError};

/// SQLite database for subjects, sessions and host state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/studydash.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("studydash.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StorageError> {
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

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl PersistenceAdapter for Database {
    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match self.kv_get(key)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| StorageError::Encoding {
                key: key.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items).map_err(|source| StorageError::Encoding {
            key: key.to_string(),
            source,
        })?;
        self.kv_set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip_and_overwrite() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("a").unwrap(), None);
        db.kv_set("a", "1").unwrap();
        db.kv_set("a", "2").unwrap();
        assert_eq!(db.kv_get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn lists_keep_order() {
        let db = Database::open_memory().unwrap();
        db.save_list("nums", &[3u32, 1, 2]).unwrap();
        let nums: Vec<u32> = db.load_list("nums").unwrap();
        assert_eq!(nums, vec![3, 1, 2]);
    }

    #[test]
    fn file_database_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.save_list("names", &["x"]).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        let names: Vec<String> = db.load_list("names").unwrap();
        assert_eq!(names, vec!["x"]);
    }
}
