//! Storage layer for glucolog.
//!
//! The reading sequence is persisted as a single serialized value: it is read
//! once when the log is opened and overwritten wholesale after every append.
//! Two backends are provided:
//!
//! - [`SqliteStore`]: one row of a key-value table in an `SQLite` database
//! - [`JsonFileStore`]: one JSON file

pub mod json_file;
pub mod migrations;
pub mod schema;
pub mod sqlite;

use tracing::debug;

use crate::config::{Config, StorageBackend};
use crate::error::Result;
use crate::reading::Reading;

pub use json_file::JsonFileStore;
pub use sqlite::SqliteStore;

/// Whole-value persistence for the reading sequence.
pub trait ReadingStore {
    /// Load the full persisted sequence, or an empty one if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or the stored
    /// value cannot be deserialized.
    fn load(&self) -> Result<Vec<Reading>>;

    /// Replace the persisted sequence with `readings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence cannot be serialized or written.
    fn save(&self, readings: &[Reading]) -> Result<()>;

    /// Human-readable description of where readings are kept.
    fn describe(&self) -> String;
}

impl<T: ReadingStore + ?Sized> ReadingStore for Box<T> {
    fn load(&self) -> Result<Vec<Reading>> {
        (**self).load()
    }

    fn save(&self, readings: &[Reading]) -> Result<()> {
        (**self).save(readings)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Open the store selected by `config.storage.backend`.
///
/// # Errors
///
/// Returns an error if the backing store cannot be opened.
pub fn open_store(config: &Config) -> Result<Box<dyn ReadingStore>> {
    debug!("Opening {} store", config.storage.backend);
    let store: Box<dyn ReadingStore> = match config.storage.backend {
        StorageBackend::Sqlite => Box::new(SqliteStore::open(
            config.database_path(),
            config.storage.key.clone(),
        )?),
        StorageBackend::Json => Box::new(JsonFileStore::open(config.json_path())?),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_store_json_backend() {
        let path = std::env::temp_dir().join(format!(
            "glucolog_open_store_{}.json",
            std::process::id()
        ));
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Json;
        config.storage.json_path = Some(path.clone());

        let store = open_store(&config).unwrap();
        store.save(&[Reading::new("08:00", 100.0)]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
        assert!(store.describe().starts_with("json:"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_open_store_sqlite_backend() {
        let path = std::env::temp_dir().join(format!(
            "glucolog_open_store_{}.db",
            std::process::id()
        ));
        let mut config = Config::default();
        config.storage.database_path = Some(path.clone());
        config.storage.key = "custom".to_string();

        let store = open_store(&config).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert!(store.describe().ends_with("#custom"));

        drop(store);
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
    }
}
