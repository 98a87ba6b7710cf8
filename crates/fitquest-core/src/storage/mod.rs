mod config;
pub mod database;
pub mod keys;
mod migrations;

pub use config::{AlertsConfig, Config, DefaultTargets};
pub use database::Database;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::{ConfigError, StorageError};

/// String key-value persistence used by the ledger and the streak tracker.
///
/// Callers treat every call as fire-and-forget: failures are logged by the
/// caller and in-memory state stays authoritative.
pub trait KvStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Shared handle to the store. The tracker is single-threaded.
pub type SharedStore = Rc<dyn KvStore>;

/// Session-only store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns the FitQuest data directory, creating it if needed.
///
/// `FITQUEST_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/fitquest/`, or `~/.config/fitquest-dev/` when `FITQUEST_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FITQUEST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FITQUEST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("fitquest-dev")
            } else {
                base_dir.join("fitquest")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A store where every call fails, for degraded-mode tests.
    #[derive(Debug, Default)]
    pub struct BrokenStore;

    impl KvStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }
    }
}
