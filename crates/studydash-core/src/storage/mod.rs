//! Persistence adapters.
//!
//! The timer core only needs ordered lists stored under string keys, written
//! back whole on every change. Both backends below satisfy that contract:
//! [`MemoryStore`] for hosts that keep state in process and tests, and
//! [`Database`] for SQLite-backed persistence on disk.

mod config;
pub mod database;
pub mod memory;

pub use config::{Config, SubjectsConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ConfigError, StorageError};

/// Key under which subjects are stored.
pub const SUBJECTS_KEY: &str = "subjects";
/// Key under which study sessions are stored.
pub const SESSIONS_KEY: &str = "study-sessions";
/// Key under which hosts persist the serialized timer state.
pub const TIMER_STATE_KEY: &str = "timer-state";

/// Ordered list storage with full-replace writes.
pub trait PersistenceAdapter {
    /// Load the list stored under `key`, in stored order. A missing key is an
    /// empty list.
    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError>;

    /// Replace the list stored under `key`.
    fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError>;

    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

impl<A: PersistenceAdapter + ?Sized> PersistenceAdapter for &A {
    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        (**self).load_list(key)
    }

    fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        (**self).save_list(key, items)
    }

    fn generate_id(&self) -> String {
        (**self).generate_id()
    }
}

impl<A: PersistenceAdapter + ?Sized> PersistenceAdapter for Arc<A> {
    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        (**self).load_list(key)
    }

    fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        (**self).save_list(key, items)
    }

    fn generate_id(&self) -> String {
        (**self).generate_id()
    }
}

/// Returns the studydash data directory, creating it if needed.
///
/// `STUDYDASH_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/studydash`, or `~/.config/studydash-dev` when
/// `STUDYDASH_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STUDYDASH_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STUDYDASH_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("studydash-dev")
            } else {
                base_dir.join("studydash")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
