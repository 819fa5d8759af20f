//! `SQLite`-backed reading store.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::reading::Reading;

use super::{migrations, ReadingStore};

/// Reading store that keeps the serialized sequence in a key-value table.
///
/// The whole sequence is one JSON value under a single key; every save
/// replaces it wholesale.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Key the sequence is stored under.
    key: String,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>, key: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            path,
            key: key.into(),
            conn,
        })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory(key: impl Into<String>) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            key: key.into(),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw serialized value under this store's key, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn raw_value(&self) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [&self.key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }
}

impl ReadingStore for SqliteStore {
    fn load(&self) -> Result<Vec<Reading>> {
        let Some(value) = self.raw_value()? else {
            debug!("No readings stored under key {}", self.key);
            return Ok(Vec::new());
        };

        let readings: Vec<Reading> = serde_json::from_str(&value)?;
        debug!("Loaded {} readings from {}", readings.len(), self.path.display());
        Ok(readings)
    }

    fn save(&self, readings: &[Reading]) -> Result<()> {
        let value = serde_json::to_string(readings)?;
        self.conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            (&self.key, &value),
        )?;
        debug!("Saved {} readings under key {}", readings.len(), self.key);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}#{}", self.path.display(), self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory("diabetesData").expect("failed to create test store")
    }

    #[test]
    fn test_load_empty() {
        let store = create_test_store();
        assert!(store.load().unwrap().is_empty());
        assert!(store.raw_value().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let store = create_test_store();
        let readings = vec![Reading::new("08:00", 110.0), Reading::new("12:30", 185.5)];

        store.save(&readings).unwrap();
        assert_eq!(store.load().unwrap(), readings);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let store = create_test_store();
        store
            .save(&[Reading::new("a", 1.0), Reading::new("b", 2.0)])
            .unwrap();
        store.save(&[Reading::new("c", 3.0)]).unwrap();

        assert_eq!(store.load().unwrap(), vec![Reading::new("c", 3.0)]);

        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_raw_value_is_json_array() {
        let store = create_test_store();
        store.save(&[Reading::new("07:00", 95.0)]).unwrap();

        let raw = store.raw_value().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["time"], "07:00");
        assert_eq!(value[0]["glucose"], 95.0);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = create_test_store();
        store.save(&[Reading::new("07:00", 95.0)]).unwrap();

        let other = SqliteStore {
            path: PathBuf::from(":memory:"),
            key: "other".to_string(),
            conn: store.conn,
        };
        assert!(other.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let store = create_test_store();
        store
            .conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)",
                ("diabetesData", "not json"),
            )
            .unwrap();

        assert!(matches!(store.load(), Err(Error::Json(_))));
    }

    #[test]
    fn test_describe() {
        let store = create_test_store();
        assert_eq!(store.describe(), "sqlite::memory:#diabetesData");
        assert_eq!(store.key(), "diabetesData");
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_reopen_file_based() {
        let db_path =
            std::env::temp_dir().join(format!("glucolog_test_{}.db", std::process::id()));
        let readings = vec![Reading::new("09:00", 140.0), Reading::new("10:00", 60.0)];

        let store = SqliteStore::open(&db_path, "diabetesData").unwrap();
        store.save(&readings).unwrap();
        assert_eq!(store.path(), db_path);
        drop(store);

        let store = SqliteStore::open(&db_path, "diabetesData").unwrap();
        assert_eq!(store.load().unwrap(), readings);

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("glucolog_test_{}", std::process::id()));
        let nested_path = root.join("nested/readings.db");
        let _ = std::fs::remove_dir_all(&root);

        let store = SqliteStore::open(&nested_path, "diabetesData").unwrap();
        assert!(nested_path.exists());

        drop(store);
        let _ = std::fs::remove_dir_all(&root);
    }
}
