use std::collections::HashMap;

use thiserror::Error;

use crate::model::SiteId;
use crate::recent::RecentList;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Key/value capability behind the persisted preferences.
///
/// Implementations report failures; [`PreferenceStore`] decides how to degrade.
pub trait PreferenceBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
    failing: bool,
}

impl MemoryBackend {
    /// A backend that rejects every read and write, like a disabled browser store.
    pub fn failing() -> Self {
        Self {
            values: HashMap::new(),
            failing: true,
        }
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory backend disabled".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory backend disabled".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<B: PreferenceBackend + ?Sized> PreferenceBackend for Box<B> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Best-effort persisted preferences: dark mode and per-user recent sites.
///
/// Every read falls back to a default and every write is dropped on failure;
/// failures are only logged.
pub struct PreferenceStore<B> {
    backend: B,
    prefix: String,
    recent_capacity: usize,
}

impl<B: PreferenceBackend> PreferenceStore<B> {
    pub fn new(backend: B, prefix: &str, recent_capacity: usize) -> Self {
        Self {
            backend,
            prefix: prefix.to_string(),
            recent_capacity,
        }
    }

    pub fn dark_mode_key(&self) -> String {
        format!("{}-dark-mode", self.prefix)
    }

    pub fn recent_key(&self, user_id: u64) -> String {
        format!("{}-recent-{user_id}", self.prefix)
    }

    pub fn dark_mode(&self) -> bool {
        match self.backend.read(&self.dark_mode_key()) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(error) => {
                log::warn!("dark mode preference unreadable: {error}");
                false
            }
        }
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        let key = self.dark_mode_key();
        let value = if enabled { "true" } else { "false" };
        if let Err(error) = self.backend.write(&key, value) {
            log::warn!("dark mode preference not saved: {error}");
        }
    }

    pub fn recent(&self, user_id: u64) -> RecentList {
        let key = self.recent_key(user_id);
        let raw = match self.backend.read(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RecentList::new(self.recent_capacity),
            Err(error) => {
                log::warn!("recent sites unreadable for key={key}: {error}");
                return RecentList::new(self.recent_capacity);
            }
        };

        match serde_json::from_str::<Vec<SiteId>>(&raw) {
            Ok(ids) => RecentList::from_ids(ids, self.recent_capacity),
            Err(error) => {
                log::warn!("recent sites corrupt for key={key}: {error}");
                RecentList::new(self.recent_capacity)
            }
        }
    }

    /// Read-modify-write of the user's recent list; returns the list as it now stands.
    pub fn add_recent(&mut self, user_id: u64, id: SiteId) -> RecentList {
        let mut list = self.recent(user_id);
        list.promote(id);
        self.save_recent(user_id, &list);
        list
    }

    fn save_recent(&mut self, user_id: u64, list: &RecentList) {
        let key = self.recent_key(user_id);
        let encoded = match serde_json::to_string(list.ids()) {
            Ok(encoded) => encoded,
            Err(error) => {
                log::warn!("recent sites not encoded: {error}");
                return;
            }
        };
        if let Err(error) = self.backend.write(&key, &encoded) {
            log::warn!("recent sites not saved for key={key}: {error}");
        }
    }

    pub fn recent_capacity(&self) -> usize {
        self.recent_capacity
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
