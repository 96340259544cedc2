// src/domain/group.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::constants::DEFAULT_CARD_TITLE;
use crate::domain::Link;
use crate::util::ids::{new_id, now_millis};
use crate::util::nullable::{null_as_default, null_as_now};
use crate::util::text::split_comma_list;

/// A card: a titled collection of links, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeSet<String>,
    #[serde(default = "now_millis", deserialize_with = "null_as_now")]
    pub created_at: i64,
}

/// Card fields to merge over an existing group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub desc: Option<String>,
}

impl Group {
    pub fn new(title: &str, desc: &str) -> Self {
        Self::with_id(new_id(), title, desc)
    }

    pub fn with_id(id: String, title: &str, desc: &str) -> Self {
        let title = if title.trim().is_empty() {
            DEFAULT_CARD_TITLE
        } else {
            title
        };
        Self {
            id,
            title: title.to_string(),
            desc: desc.to_string(),
            links: Vec::new(),
            tags: BTreeSet::new(),
            created_at: now_millis(),
        }
    }

    pub fn find_link_mut(&mut self, link_id: &str) -> Option<&mut Link> {
        self.links.iter_mut().find(|l| l.id == link_id)
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.links.iter().any(|l| l.url == url)
    }

    pub fn urls(&self) -> HashSet<String> {
        self.links.iter().map(|l| l.url.clone()).collect()
    }

    pub fn link_ids(&self) -> HashSet<String> {
        self.links.iter().map(|l| l.id.clone()).collect()
    }

    /// Extend the tag set with the comma separated entries of `note`.
    /// Returns how many tags were new.
    pub fn absorb_note_tags(&mut self, note: &str) -> usize {
        self.add_tags(split_comma_list(note))
    }

    pub fn add_tags<I, S>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .filter(|t| self.tags.insert(t.clone()))
            .count()
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag.trim())
    }

    pub fn apply(&mut self, patch: &CardPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(desc) = &patch.desc {
            self.desc = desc.clone();
        }
    }

    /// Case-insensitive title ordering used for display.
    pub fn display_key(&self) -> (String, String) {
        (self.title.to_lowercase(), self.id.clone())
    }
}
