// src/application/transfer.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::{BACKUP_FILE_PREFIX, BACKUP_TIMESTAMP_FORMAT};
use crate::domain::{DomainError, Group, Link, Store};
use crate::util::ids::{new_id, now_millis};
use crate::util::nullable::null_as_default;

/// A backup document as accepted by import. Every field but `groups` may be
/// missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackupDocument {
    pub groups: BTreeMap<String, IncomingGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub groups_created: usize,
    pub links_added: usize,
    pub tags_added: usize,
}

/// Parse a backup. A document without a `groups` object is rejected.
pub fn parse_backup(raw: &str) -> Result<BackupDocument, DomainError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| DomainError::FormatError(e.to_string()))?;
    match value.get("groups") {
        Some(Value::Object(_)) => {}
        Some(_) => return Err(DomainError::FormatError("`groups` is not an object".to_string())),
        None => return Err(DomainError::FormatError("missing `groups`".to_string())),
    }
    serde_json::from_value(value).map_err(|e| DomainError::FormatError(e.to_string()))
}

/// Merge `document` into `store` without overwriting or removing anything.
///
/// Cards are matched by id (the embedded id, else the map key, else a fresh
/// id). A link is
/// added only when its card has no link with the same url; links without a
/// url are skipped. Link ids that are missing or already taken in the card
/// are replaced.
pub fn merge(store: &mut Store, document: BackupDocument) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for (key, incoming) in document.groups {
        let dest_id = incoming
            .id
            .filter(|id| !id.is_empty())
            .or_else(|| Some(key).filter(|k| !k.is_empty()))
            .unwrap_or_else(new_id);

        let dest = store.groups.entry(dest_id.clone()).or_insert_with(|| {
            summary.groups_created += 1;
            let mut group = Group::with_id(
                dest_id.clone(),
                incoming.title.as_deref().unwrap_or_default(),
                incoming.desc.as_deref().unwrap_or_default(),
            );
            if let Some(created_at) = incoming.created_at.filter(|t| *t > 0) {
                group.created_at = created_at;
            }
            group
        });

        let mut urls = dest.urls();
        let mut ids = dest.link_ids();
        for mut link in incoming.links {
            if link.url.is_empty() || !urls.insert(link.url.clone()) {
                continue;
            }
            if link.id.is_empty() || ids.contains(&link.id) {
                link.id = new_id();
            }
            ids.insert(link.id.clone());
            if link.created_at <= 0 {
                link.created_at = now_millis();
            }
            link.refresh_host();
            dest.links.push(link);
            summary.links_added += 1;
        }

        summary.tags_added += dest.add_tags(&incoming.tags);
        debug!(group_id = %dest_id, "Merged card");
    }
    summary
}

/// `bookmarks-backup-YYYY-MM-DD-HH-MM-SS.json`
pub fn backup_file_name(at: DateTime<Utc>) -> String {
    format!(
        "{BACKUP_FILE_PREFIX}{}.json",
        at.format(BACKUP_TIMESTAMP_FORMAT)
    )
}
