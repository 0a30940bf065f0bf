//! Persisted user preferences.
//!
//! [`PreferenceStore`] is a plain key-value facility; [`FilterPreference`]
//! sits on top of it and stores the active view [`Filter`] under the
//! `filter` key as a JSON-encoded string (`"checked"`).
//!
//! Persisting the filter is best-effort: a store that cannot be read yields
//! the default filter and a store that cannot be written is reported as a
//! warning, neither interrupts the caller.

use super::data_storage::DataStorage;
use super::filter::Filter;
use crate::libs::messages::Message;
use crate::msg_warning;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Key under which the active filter is stored.
pub const FILTER_KEY: &str = "filter";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference location unavailable: {0}")]
    Location(String),

    #[error("preference file cannot be accessed: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// Key-value persistence for small string preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Opens `preferences.json` in the application data directory.
    pub fn new() -> Result<Self, PreferenceError> {
        let path = DataStorage::new()
            .get_path(PREFERENCES_FILE_NAME)
            .map_err(|e| PreferenceError::Location(e.to_string()))?;
        Ok(Self { path })
    }

    /// Uses an explicit file instead of the data directory.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // A corrupted file is replaced rather than blocking every later write.
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// In-process preferences, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the active view filter.
#[derive(Debug)]
pub struct FilterPreference<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> FilterPreference<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored filter, or [`Filter::All`] when nothing usable is stored.
    pub fn load_filter(&self) -> Filter {
        match self.store.get(FILTER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Filter>(&raw) {
                Ok(filter) => filter,
                Err(e) => {
                    msg_warning!(Message::FilterUnreadable(e.to_string()));
                    Filter::default()
                }
            },
            Ok(None) => Filter::default(),
            Err(e) => {
                msg_warning!(Message::FilterUnreadable(e.to_string()));
                Filter::default()
            }
        }
    }

    /// Stores `filter`. Failures are reported and otherwise ignored.
    pub fn save_filter(&self, filter: Filter) {
        let result = serde_json::to_string(&filter)
            .map_err(PreferenceError::from)
            .and_then(|encoded| self.store.set(FILTER_KEY, &encoded));

        if let Err(e) = result {
            msg_warning!(Message::FilterSaveFailed(e.to_string()));
        }
    }
}
