// src/domain/link.rs
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::DomainError;
use crate::util::ids::{new_id, now_millis};
use crate::util::nullable::{null_as_default, null_as_now};

/// A single bookmarked URL. `host` is always derived from `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default = "new_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default = "now_millis", deserialize_with = "null_as_now")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: String,
}

/// Fields to replace on an existing link. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub note: Option<String>,
}

impl Link {
    /// Build a fresh link. A blank title falls back to the url.
    pub fn new(url: &str, title: &str, note: &str) -> Self {
        let title = if title.trim().is_empty() { url } else { title };
        Self {
            id: new_id(),
            url: url.to_string(),
            title: title.to_string(),
            note: note.to_string(),
            created_at: now_millis(),
            host: host_from(url),
        }
    }

    /// Apply a patch in place, keeping `host` in step with `url`.
    pub fn apply(&mut self, patch: &LinkPatch) {
        if let Some(url) = &patch.url {
            self.url = url.clone();
            self.host = host_from(url);
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(note) = &patch.note {
            self.note = note.clone();
        }
    }

    /// Recompute `host` from the current `url`.
    pub fn refresh_host(&mut self) {
        self.host = host_from(&self.url);
    }
}

/// Hostname portion of `url`, or an empty string when it does not parse.
pub fn host_from(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Reject urls that do not parse as absolute URLs.
pub fn validate_url(url: &str) -> Result<(), DomainError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|_| DomainError::InvalidUrl(url.to_string()))
}
