//! JSON file reading store.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::reading::Reading;

use super::ReadingStore;

/// Reading store that keeps the sequence as a JSON array in one file.
///
/// A missing file reads as an empty sequence. Saves are written to a sibling
/// temporary file and renamed over the original.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Using JSON store at {}", path.display());
        Ok(Self { path })
    }

    /// Get the path to the JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ReadingStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Reading>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No readings file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let readings: Vec<Reading> = serde_json::from_str(&contents)?;
        debug!("Loaded {} readings from {}", readings.len(), self.path.display());
        Ok(readings)
    }

    fn save(&self, readings: &[Reading]) -> Result<()> {
        let contents = serde_json::to_string_pretty(readings)?;
        let temp = self.temp_path();
        std::fs::write(&temp, contents)?;
        std::fs::rename(&temp, &self.path)?;
        debug!("Saved {} readings to {}", readings.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("glucolog_{name}_{}.json", std::process::id()))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = temp_file("missing");
        let _ = std::fs::remove_file(&path);

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_file("roundtrip");
        let readings = vec![Reading::new("08:00", 101.0), Reading::new("08:30", 99.5)];

        JsonFileStore::open(&path).unwrap().save(&readings).unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), readings);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let path = temp_file("tempfile");
        let store = JsonFileStore::open(&path).unwrap();
        store.save(&[Reading::new("08:00", 120.0)]).unwrap();

        assert!(path.exists());
        assert!(!store.temp_path().exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_is_plain_array() {
        let path = temp_file("shape");
        let store = JsonFileStore::open(&path).unwrap();
        store.save(&[Reading::new("06:45", 88.0)]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["time"], "06:45");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_file("corrupt");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert!(matches!(store.load(), Err(Error::Json(_))));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_describe() {
        let store = JsonFileStore::open(temp_file("describe")).unwrap();
        assert!(store.describe().starts_with("json:"));
        assert!(store.describe().ends_with(".json"));
    }
}
