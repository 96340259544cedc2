// src/ports/text.rs
use crate::application::{CardView, SearchView};
use crate::ports::html::meta_line;

/// Plain terminal listing of a search view.
#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, view: &SearchView) -> String {
        let mut out = String::new();
        if view.total_cards == 0 {
            out.push_str("No cards yet. Create one with `linkcards new-card <TITLE>`.\n");
        } else if view.cards.is_empty() {
            out.push_str("No matching cards.\n");
        }
        for card in &view.cards {
            out.push_str(&self.render_card(card));
        }
        if let Some(stats) = view.stats_line() {
            out.push_str(&format!("{stats}\n"));
        }
        out
    }

    fn render_card(&self, card: &CardView) -> String {
        let mut lines = vec![format!("{} [{}]", card.title, card.id)];
        if !card.desc.is_empty() {
            lines.push(format!("  {}", card.desc));
        }
        if !card.tags.is_empty() {
            let tags: Vec<&str> = card.tags.iter().map(String::as_str).collect();
            lines.push(format!("  tags: {}", tags.join(", ")));
        }
        for link in &card.links {
            lines.push(format!("  - {} <{}> [{}]", link.title, link.url, link.id));
            lines.push(format!("    {}", meta_line(link)));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::search;
    use crate::domain::{Group, Link, Store};

    #[test]
    fn given_card_with_link_when_rendering_then_lists_ids_and_tags() {
        let mut store = Store::default();
        let mut group = Group::with_id("g1".to_string(), "Reading", "books");
        let mut link = Link::new("https://a.com", "A", "x");
        link.id = "l1".to_string();
        group.links.push(link);
        group.add_tags(["x"]);
        store.groups.insert("g1".to_string(), group);

        let text = TextPresenter::new().render(&search(&store, ""));

        assert!(text.starts_with("Reading [g1]\n  books\n  tags: x\n  - A <https://a.com> [l1]\n"));
    }

    #[test]
    fn given_no_match_when_rendering_then_reports_and_prints_stats() {
        let mut store = Store::default();
        let group = Group::with_id("g1".to_string(), "Reading", "");
        store.groups.insert("g1".to_string(), group);

        let text = TextPresenter::new().render(&search(&store, "zzz"));

        assert_eq!(text, "No matching cards.\n0 cards • 0 matching links\n");
    }

    #[test]
    fn given_empty_store_when_rendering_query_then_empty_state_without_stats() {
        let text = TextPresenter::new().render(&search(&Store::default(), "zzz"));

        assert!(text.starts_with("No cards yet."));
        assert!(!text.contains("matching"));
    }
}
