// src/application/searcher.rs
use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::{Group, Link, Store};
use crate::util::text::plural;

/// A card as it appears in a search result: only the matching links are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub tags: BTreeSet<String>,
    pub created_at: i64,
    /// The card's own title or description matched the query.
    pub card_match: bool,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub query: String,
    pub cards: Vec<CardView>,
    pub total_link_matches: usize,
    /// Cards in the store, matching or not.
    pub total_cards: usize,
}

impl SearchView {
    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    /// `"2 cards • 3 matching links"`, only for a non-empty query over a
    /// non-empty store.
    pub fn stats_line(&self) -> Option<String> {
        if !self.is_filtered() || self.total_cards == 0 {
            return None;
        }
        let cards = self.cards.len();
        let links = self.total_link_matches;
        Some(format!(
            "{cards} {} • {links} matching {}",
            plural(cards, "card", "cards"),
            plural(links, "link", "links")
        ))
    }
}

/// Case-insensitive substring search over cards and their links.
///
/// A card is kept when its title or description matches or when any of its
/// links matches on title, url, note or host. An empty query keeps
/// everything. Cards come back ordered by title.
pub fn search(store: &Store, query: &str) -> SearchView {
    let query = query.trim();
    let needle = query.to_lowercase();

    let mut groups: Vec<&Group> = store.groups.values().collect();
    groups.sort_by_key(|g| g.display_key());

    let mut view = SearchView {
        query: query.to_string(),
        total_cards: store.groups.len(),
        ..Default::default()
    };

    for group in groups {
        if needle.is_empty() {
            view.cards.push(card_view(group, false, group.links.clone()));
            continue;
        }

        let card_match = contains(&group.title, &needle) || contains(&group.desc, &needle);
        let links: Vec<Link> = group
            .links
            .iter()
            .filter(|l| link_matches(l, &needle))
            .cloned()
            .collect();

        if card_match || !links.is_empty() {
            view.total_link_matches += links.len();
            view.cards.push(card_view(group, card_match, links));
        }
    }
    view
}

fn link_matches(link: &Link, needle: &str) -> bool {
    let combined = [&link.title, &link.url, &link.note, &link.host]
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    contains(&combined, needle)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn card_view(group: &Group, card_match: bool, links: Vec<Link>) -> CardView {
    CardView {
        id: group.id.clone(),
        title: group.title.clone(),
        desc: group.desc.clone(),
        tags: group.tags.clone(),
        created_at: group.created_at,
        card_match,
        links,
    }
}
