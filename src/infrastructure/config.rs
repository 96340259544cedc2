// src/infrastructure/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::application::RepositoryOptions;
use crate::constants::APP_DIR_NAME;

/// TOML configuration for linkcards
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub tags: TagsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct StorageConfig {
    /// Directory holding the key files; empty means the platform data dir.
    #[serde(default)]
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_derive_from_notes")]
    pub derive_from_notes: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ExportConfig {
    /// Directory for backup files; empty means the working directory.
    #[serde(default)]
    pub dir: String,
}

fn default_derive_from_notes() -> bool { true }

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            derive_from_notes: default_derive_from_notes(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load `path` when it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            debug!(path = ?path.as_ref(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// `<config dir>/linkcards/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
    }

    /// Storage directory: the configured one, else `<data dir>/linkcards`
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if !self.storage.dir.is_empty() {
            return Ok(PathBuf::from(&self.storage.dir));
        }
        let data_dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(data_dir.join(APP_DIR_NAME))
    }

    /// Export directory: the configured one, else the working directory
    pub fn export_dir(&self) -> PathBuf {
        if self.export.dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.export.dir)
        }
    }

    pub fn repository_options(&self) -> RepositoryOptions {
        RepositoryOptions {
            derive_tags_from_notes: self.tags.derive_from_notes,
        }
    }
}
