// src/application/migrator.rs
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, info, instrument, warn};

use crate::application::KeyValueStore;
use crate::constants::{DEFAULT_CARD_TITLE, LEGACY_V1_KEY, LEGACY_V2_KEY, STORAGE_KEY};
use crate::domain::{DomainError, Group, Link, Store};
use crate::util::ids::{new_id, now_millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    pub fn key(self) -> &'static str {
        match self {
            SchemaVersion::V1 => LEGACY_V1_KEY,
            SchemaVersion::V2 => LEGACY_V2_KEY,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "v1"),
            SchemaVersion::V2 => write!(f, "v2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The current-schema key already exists; legacy keys are ignored.
    AlreadyCurrent,
    /// No legacy key was found.
    NothingToMigrate,
    Migrated { from: SchemaVersion, groups: usize },
    /// The legacy blob did not parse. Nothing was written.
    Failed { from: SchemaVersion },
}

#[derive(Debug, Default, Deserialize)]
struct LegacyDocument {
    #[serde(default)]
    groups: BTreeMap<String, LegacyGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct LegacyGroup {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    links: Option<Vec<Link>>,
}

/// Rewrites a legacy blob into the current schema, once.
pub struct SchemaMigrator<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> SchemaMigrator<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Migrate the newest legacy schema present, if the current key is absent.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> Result<MigrationOutcome, DomainError> {
        if self.storage.contains(STORAGE_KEY)? {
            debug!("Current schema present, skipping migration");
            return Ok(MigrationOutcome::AlreadyCurrent);
        }

        for version in [SchemaVersion::V2, SchemaVersion::V1] {
            if let Some(raw) = self.storage.get(version.key())? {
                return self.migrate(version, &raw);
            }
        }

        debug!("No legacy schema found");
        Ok(MigrationOutcome::NothingToMigrate)
    }

    fn migrate(
        &mut self,
        version: SchemaVersion,
        raw: &str,
    ) -> Result<MigrationOutcome, DomainError> {
        let legacy: LegacyDocument = match serde_json::from_str(raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(%version, error = %e, "Migration failed");
                return Ok(MigrationOutcome::Failed { from: version });
            }
        };

        let store = convert(version, legacy);
        let groups = store.groups.len();
        self.storage.set(STORAGE_KEY, &store.to_json()?)?;

        info!(%version, groups, "Migrated legacy bookmarks");
        Ok(MigrationOutcome::Migrated {
            from: version,
            groups,
        })
    }
}

/// Old card ids are discarded and every card is stamped with the current time.
fn convert(version: SchemaVersion, legacy: LegacyDocument) -> Store {
    let mut store = Store::default();
    let created_at = now_millis();

    for (_, old) in legacy.groups {
        let id = new_id();
        let title = [old.title.as_deref(), old.host.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CARD_TITLE)
            .to_string();
        let desc = match version {
            SchemaVersion::V1 => String::new(),
            SchemaVersion::V2 => old.desc.unwrap_or_default(),
        };

        let mut seen_ids = HashSet::new();
        let mut seen_urls = HashSet::new();
        let links = old
            .links
            .unwrap_or_default()
            .into_iter()
            .filter(|l| seen_urls.insert(l.url.clone()))
            .map(|mut l| {
                if !seen_ids.insert(l.id.clone()) {
                    l.id = new_id();
                    seen_ids.insert(l.id.clone());
                }
                l.refresh_host();
                l
            })
            .collect();

        let tags: BTreeSet<String> = old.tags.unwrap_or_default().into_iter().collect();
        store.groups.insert(
            id.clone(),
            Group {
                id,
                title,
                desc,
                links,
                tags,
                created_at,
            },
        );
    }
    store
}
