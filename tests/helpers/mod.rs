use anyhow::{Context, Result};
use linkcards::application::{BookmarkRepository, KeyValueStore};
use linkcards::infrastructure::FileKeyValueStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture owning a temporary bookmark data directory
#[allow(dead_code)]
pub struct TestStore {
    _temp_dir: TempDir,
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    /// Create an empty data directory
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()
            .context("Failed to create temporary directory")?;
        let data_dir = temp_dir.path().join("data");

        Ok(Self {
            _temp_dir: temp_dir,
            data_dir,
        })
    }

    /// Create a data directory with `key` preloaded from a fixture file
    pub fn with_fixture(key: &str, fixture: &str) -> Result<Self> {
        let store = Self::new()?;
        store.open_storage()?.set(key, &read_fixture(fixture)?)?;
        Ok(store)
    }

    pub fn open_storage(&self) -> Result<FileKeyValueStore> {
        Ok(FileKeyValueStore::new(&self.data_dir)?)
    }

    /// Open repository for this data directory (migrates and loads)
    pub fn open_repository(&self) -> Result<BookmarkRepository<FileKeyValueStore>> {
        Ok(BookmarkRepository::open(self.open_storage()?)?)
    }

    pub fn read_key(&self, key: &str) -> Result<Option<String>> {
        Ok(self.open_storage()?.get(key)?)
    }

    /// Scratch path inside the temp dir, outside the data directory
    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self._temp_dir.path().join(name)
    }
}

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[allow(dead_code)]
pub fn read_fixture(name: &str) -> Result<String> {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))
}

#[allow(dead_code)]
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Known ids from backup_v3.json
#[allow(dead_code)]
pub mod backup_ids {
    pub const RUST: &str = "g-rust";
    pub const COOKING: &str = "g-cooking";
    pub const BOOK_LINK: &str = "l-book";
    pub const NONEXISTENT: &str = "g-missing";
}
