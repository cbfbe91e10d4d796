//! Persisted tool configuration.
//!
//! The whole user-visible selection state - decks, note types, requested
//! count, field mapping - is one overwritable record. Any change
//! re-serializes the full snapshot; startup loads it back if present.
//!
//! The store is a capability trait so frontends and tests can inject
//! their own implementation; [`FileStore`] is the production one, a
//! single JSON file under the platform-local data directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mapping::FieldMapping;

const APP_DIR: &str = "cardgen";
const CONFIG_FILE: &str = "config.json";

/// The persisted configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// Deck the source cards are drawn from.
    pub source_deck: String,
    /// Deck the new notes are created in.
    pub dest_deck: String,
    /// Note type of the source cards.
    pub source_model: String,
    /// Note type of the created notes.
    pub dest_model: String,
    /// Requested number of notes per run.
    pub count: usize,
    /// Destination-field to source-field mapping.
    pub field_mapping: FieldMapping,
}

/// Load/save capability for the configuration record.
pub trait ConfigStore {
    /// Load the stored record, or `None` when none has been saved yet.
    fn load(&self) -> Result<Option<StoredConfig>>;

    /// Overwrite the stored record with a full snapshot.
    fn save(&self, config: &StoredConfig) -> Result<()>;
}

/// File-backed configuration store.
///
/// One pretty-printed JSON file at a fixed path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the platform default location.
    pub fn at_default() -> Self {
        Self::new(Self::default_path())
    }

    /// The platform default config path:
    /// `<local data dir>/cardgen/config.json`.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> Result<Option<StoredConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&json)?;
        Ok(Some(config))
    }

    fn save(&self, config: &StoredConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory configuration store.
///
/// Useful as a test double and for one-shot runs that should not touch
/// the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<StoredConfig>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredConfig>> {
        Ok(self.record.lock().expect("config store lock poisoned").clone())
    }

    fn save(&self, config: &StoredConfig) -> Result<()> {
        *self.record.lock().expect("config store lock poisoned") = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> StoredConfig {
        let mut field_mapping = FieldMapping::new();
        field_mapping.set("Front", "Word");
        field_mapping.set("Back", "Reading");
        StoredConfig {
            source_deck: "Japanese".to_string(),
            dest_deck: "Japanese::Review".to_string(),
            source_model: "Vocab".to_string(),
            dest_model: "Review".to_string(),
            count: 2,
            field_mapping,
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("config.json"));

        assert!(store.load().unwrap().is_none());

        let config = sample_config();
        store.save(&config).unwrap();
        let loaded = store.load().unwrap().expect("record should exist");

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_file_store_overwrites_single_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("config.json"));

        let mut config = sample_config();
        store.save(&config).unwrap();

        config.count = 10;
        config.field_mapping.unset("Back");
        store.save(&config).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.count, 10);
        assert_eq!(loaded.field_mapping.source_for("Back"), None);
        assert_eq!(loaded.field_mapping.source_for("Front"), Some("Word"));
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("deep").join("config.json"));

        store.save(&sample_config()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let config = sample_config();
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), config);
    }

    #[test]
    fn test_serialized_form_is_stable() {
        // The snapshot is rewritten on every change; a stable key order
        // keeps successive files diffable.
        let a = serde_json::to_string_pretty(&sample_config()).unwrap();
        let b = serde_json::to_string_pretty(&sample_config()).unwrap();
        assert_eq!(a, b);
    }
}
