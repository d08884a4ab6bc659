//! Settings storage backends and change broadcasting.

use super::{SettingKey, Settings};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::debug;

/// Errors raised by a settings store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("settings file {} is not accessible", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The backing file holds something other than a JSON object.
    #[error("settings file {} is malformed", path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
    /// The store is not reachable at all.
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
    /// A value was rejected for a recognized key.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Storage key name
        key: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

/// Named storage partitions. Only `sync` carries autoscroll preferences.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    /// Settings synced across the user's browsers
    #[default]
    Sync,
    /// Machine-local storage
    Local,
    /// Policy-managed storage
    Managed,
    /// In-memory, per-session storage
    Session,
}

/// Old and new value of one key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageChange {
    /// Value before the write, if there was one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    /// Value after the write; absent when the key was removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

/// A batch of changes delivered to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeNotice {
    /// Partition that changed
    pub area: StorageArea,
    /// Changed keys
    pub changes: BTreeMap<String, StorageChange>,
}

impl ChangeNotice {
    /// A `sync` notice carrying a single new value.
    #[must_use]
    pub fn single(key: &str, old_value: Option<Value>, new_value: Value) -> Self {
        let mut changes = BTreeMap::new();
        changes.insert(
            key.to_string(),
            StorageChange {
                old_value,
                new_value: Some(new_value),
            },
        );
        Self {
            area: StorageArea::Sync,
            changes,
        }
    }
}

/// Fan-out of change notices to any number of subscribers.
///
/// Subscribers whose receiver has been dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Vec<Sender<ChangeNotice>>,
}

impl ChangeFeed {
    /// Create a feed with no subscribers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Receiver<ChangeNotice> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver a notice to every live subscriber.
    pub fn publish(&mut self, notice: &ChangeNotice) {
        self.subscribers
            .retain(|tx| tx.send(notice.clone()).is_ok());
    }

    /// Number of live subscribers as of the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// A key/value store holding autoscroll preferences.
pub trait SettingsStore {
    /// Read the current preferences, laid over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self) -> Result<Settings, StoreError>;

    /// Write one value and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is invalid or cannot be persisted.
    fn set(&mut self, key: SettingKey, value: Value) -> Result<(), StoreError>;

    /// Subscribe to change notices.
    fn subscribe(&mut self) -> Receiver<ChangeNotice>;
}

fn validate(key: SettingKey, value: &Value) -> Result<(), StoreError> {
    Settings::default().set_value(key, value)
}

/// In-process store, used by tests and the simulator.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Map<String, Value>,
    feed: ChangeFeed,
    unavailable: bool,
}

impl MemoryStore {
    /// Create an empty store (every key at its default).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given preferences.
    #[must_use]
    pub fn with_settings(settings: &Settings) -> Self {
        let values = SettingKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), settings.value(*key)))
            .collect();
        Self {
            values,
            ..Self::default()
        }
    }

    /// Make every subsequent read fail, or recover.
    pub const fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Publish a notice as if another writer had changed the store.
    pub fn notify(&mut self, notice: &ChangeNotice) {
        self.feed.publish(notice);
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self) -> Result<Settings, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store disabled".to_string()));
        }
        Ok(Settings::from_stored(&self.values))
    }

    fn set(&mut self, key: SettingKey, value: Value) -> Result<(), StoreError> {
        validate(key, &value)?;
        let old = self.values.insert(key.as_str().to_string(), value.clone());
        self.feed
            .publish(&ChangeNotice::single(key.as_str(), old, value));
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<ChangeNotice> {
        self.feed.subscribe()
    }
}

/// Store backed by a JSON object on disk.
///
/// Keys the engine does not know about are preserved on write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    feed: ChangeFeed,
}

impl JsonFileStore {
    /// Open a store at the given path. The file is created on first write.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            feed: ChangeFeed::new(),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            debug!("Settings file not found, using defaults");
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_raw(&self, values: &Map<String, Value>) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(values).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content).map_err(io_err)?;
        debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self) -> Result<Settings, StoreError> {
        let values = self.read_raw()?;
        Ok(Settings::from_stored(&values))
    }

    fn set(&mut self, key: SettingKey, value: Value) -> Result<(), StoreError> {
        validate(key, &value)?;
        let mut values = self.read_raw()?;
        let old = values.insert(key.as_str().to_string(), value.clone());
        self.write_raw(&values)?;
        self.feed
            .publish(&ChangeNotice::single(key.as_str(), old, value));
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<ChangeNotice> {
        self.feed.subscribe()
    }
}
