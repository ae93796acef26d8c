//! In-process key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::PersistenceAdapter;
use crate::error::StorageError;

/// Lists held as JSON values behind a mutex.
///
/// Values go through `serde_json` on every read and write so the store
/// behaves like a serializing backend: what comes out is a fresh copy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items stored under `key`.
    pub fn list_len(&self, key: &str) -> usize {
        self.lists
            .lock()
            .ok()
            .and_then(|lists| lists.get(key).and_then(|v| v.as_array().map(Vec::len)))
            .unwrap_or(0)
    }
}

impl PersistenceAdapter for MemoryStore {
    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let lists = self
            .lists
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        match lists.get(key) {
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|source| StorageError::Encoding {
                    key: key.to_string(),
                    source,
                })
            }
            None => Ok(Vec::new()),
        }
    }

    fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let value = serde_json::to_value(items).map_err(|source| StorageError::Encoding {
            key: key.to_string(),
            source,
        })?;
        let mut lists = self
            .lists
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        lists.insert(key.to_string(), value);
        Ok(())
    }
}
