use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::{keys, KvStore};

/// User-configured daily goals. A target of 0 hides that nutrient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

impl Targets {
    /// Read the four `target*` keys, using `fallback` for any key that is
    /// missing or not a number.
    ///
    /// # Errors
    /// Returns the first storage error encountered.
    pub fn load(store: &dyn KvStore, fallback: Targets) -> Result<Self, StorageError> {
        Ok(Self {
            calories: load_u32(store, keys::TARGET_CALORIES)?.unwrap_or(fallback.calories),
            protein: load_u32(store, keys::TARGET_PROTEIN)?.unwrap_or(fallback.protein),
            carbs: load_u32(store, keys::TARGET_CARBS)?.unwrap_or(fallback.carbs),
            fats: load_u32(store, keys::TARGET_FATS)?.unwrap_or(fallback.fats),
        })
    }

    /// Write all four `target*` keys.
    ///
    /// # Errors
    /// Returns the first storage error encountered.
    pub fn save(&self, store: &dyn KvStore) -> Result<(), StorageError> {
        store.save(keys::TARGET_CALORIES, &self.calories.to_string())?;
        store.save(keys::TARGET_PROTEIN, &self.protein.to_string())?;
        store.save(keys::TARGET_CARBS, &self.carbs.to_string())?;
        store.save(keys::TARGET_FATS, &self.fats.to_string())?;
        Ok(())
    }

    /// Whether any macro has a non-zero target.
    pub fn tracks_macros(&self) -> bool {
        self.protein > 0 || self.carbs > 0 || self.fats > 0
    }
}

/// Per-macro tracking switches. Persisted and loaded, not used by the
/// ledger or streak logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingFlags {
    pub protein: bool,
    pub carbs: bool,
    pub fats: bool,
}

impl Default for TrackingFlags {
    fn default() -> Self {
        Self {
            protein: true,
            carbs: true,
            fats: true,
        }
    }
}

impl TrackingFlags {
    /// Unset keys default to on; a stored value is on only if it is `"true"`.
    ///
    /// # Errors
    /// Returns the first storage error encountered.
    pub fn load(store: &dyn KvStore) -> Result<Self, StorageError> {
        let defaults = Self::default();
        Ok(Self {
            protein: load_flag(store, keys::TRACK_PROTEIN)?.unwrap_or(defaults.protein),
            carbs: load_flag(store, keys::TRACK_CARBS)?.unwrap_or(defaults.carbs),
            fats: load_flag(store, keys::TRACK_FATS)?.unwrap_or(defaults.fats),
        })
    }

    /// # Errors
    /// Returns the first storage error encountered.
    pub fn save(&self, store: &dyn KvStore) -> Result<(), StorageError> {
        store.save(keys::TRACK_PROTEIN, &self.protein.to_string())?;
        store.save(keys::TRACK_CARBS, &self.carbs.to_string())?;
        store.save(keys::TRACK_FATS, &self.fats.to_string())?;
        Ok(())
    }
}

fn load_u32(store: &dyn KvStore, key: &str) -> Result<Option<u32>, StorageError> {
    Ok(store
        .load(key)?
        .and_then(|raw| raw.trim().parse::<u32>().ok()))
}

fn load_flag(store: &dyn KvStore, key: &str) -> Result<Option<bool>, StorageError> {
    Ok(store.load(key)?.map(|raw| raw == "true"))
}
