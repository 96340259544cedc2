// src/domain/store.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::{DomainError, Group};

/// Every card, keyed by card id. The unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub groups: BTreeMap<String, Group>,
}

impl Store {
    /// Parse a persisted blob.
    ///
    /// Returns `Ok(None)` when the document is valid JSON but carries no
    /// `groups` object; such a payload leaves the in-memory store alone.
    pub fn parse(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        match value.get("groups") {
            Some(Value::Object(_)) => serde_json::from_value(value).map(Some),
            _ => Ok(None),
        }
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| DomainError::StorageError(e.to_string()))
    }

    pub fn link_count(&self) -> usize {
        self.groups.values().map(|g| g.links.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
