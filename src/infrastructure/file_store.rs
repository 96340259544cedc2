// src/infrastructure/file_store.rs
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::application::KeyValueStore;
use crate::domain::DomainError;

/// Key-value store backed by a directory: each key lives in `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory that is then renamed
/// over the target, so readers never see a half-written blob.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Open (and create if needed) the storage directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, DomainError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            DomainError::StorageError(format!(
                "Failed to create storage directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        debug!(?dir, "Opened file storage");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && !key.starts_with('.');
        if !valid {
            return Err(DomainError::StorageError(format!("Invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    #[instrument(level = "trace", skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::StorageError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    #[instrument(level = "trace", skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        let write_err =
            |e: std::io::Error| DomainError::StorageError(format!("Failed to write {}: {}", path.display(), e));

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        debug!(?path, bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::StorageError(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_missing_key_when_getting_then_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStore::new(temp_dir.path()).unwrap();

        assert_eq!(storage.get("bookmarkGroups.v3").unwrap(), None);
    }

    #[test]
    fn given_value_when_setting_then_written_to_key_file() {
        // Arrange
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileKeyValueStore::new(temp_dir.path()).unwrap();

        // Act
        storage.set("bookmarkGroups.v3", r#"{"groups":{}}"#).unwrap();

        // Assert
        let on_disk = fs::read_to_string(temp_dir.path().join("bookmarkGroups.v3.json")).unwrap();
        assert_eq!(on_disk, r#"{"groups":{}}"#);
        assert_eq!(storage.get("bookmarkGroups.v3").unwrap().as_deref(), Some(r#"{"groups":{}}"#));
    }

    #[test]
    fn given_existing_value_when_overwriting_then_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileKeyValueStore::new(temp_dir.path()).unwrap();
        storage.set("k", "a much longer first value").unwrap();

        storage.set("k", "short").unwrap();

        assert_eq!(storage.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn given_missing_key_when_removing_then_ok() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileKeyValueStore::new(temp_dir.path()).unwrap();

        assert!(storage.remove("absent").is_ok());
    }

    #[test]
    fn given_nested_directory_when_opening_then_creates_it() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let storage = FileKeyValueStore::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.dir(), nested.as_path());
    }

    #[test]
    fn given_path_traversal_key_when_resolving_then_rejects() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStore::new(temp_dir.path()).unwrap();

        assert!(storage.path_for("../escape").is_err());
        assert!(storage.path_for("").is_err());
        assert!(storage.path_for(".hidden").is_err());
    }
}
