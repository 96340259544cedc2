// src/ports/html.rs
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::application::{CardView, SearchView};
use crate::domain::Link;
use crate::ports::highlight::Highlighter;
use crate::util::text::plural;

/// Renders a search view as a standalone HTML page of cards.
#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, view: &SearchView) -> String {
        let highlighter = Highlighter::new(&view.query);
        let mut body = String::new();

        if let Some(stats) = view.stats_line() {
            body.push_str(&format!("<p class=\"stats\">{}</p>\n", encode_text(&stats)));
        }
        if view.total_cards == 0 {
            body.push_str(r#"<p class="empty">No cards yet.</p>"#);
        } else if view.cards.is_empty() {
            body.push_str(r#"<p class="empty">No matching cards.</p>"#);
        }
        for card in &view.cards {
            body.push_str(&self.render_card(card, view.is_filtered(), &highlighter));
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Bookmarks</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 960px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            padding: 1rem 1.5rem;
            margin-bottom: 1rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .desc, .meta, .stats {{
            color: #666;
            font-size: 0.9em;
        }}
        .tag {{
            display: inline-block;
            background: #e9ecef;
            padding: 2px 8px;
            border-radius: 4px;
            margin-right: 4px;
            font-size: 0.8em;
        }}
        mark {{
            background: #ffe58f;
        }}
    </style>
</head>
<body>
{body}
</body>
</html>"#
        )
    }

    fn render_card(&self, card: &CardView, filtered: bool, highlighter: &Highlighter) -> String {
        let desc = if card.desc.is_empty() {
            String::new()
        } else {
            format!("  <div class=\"desc\">{}</div>\n", highlighter.html(&card.desc))
        };
        let tags = if card.tags.is_empty() {
            String::new()
        } else {
            let spans: String = card
                .tags
                .iter()
                .map(|tag| format!(r#"<span class="tag">{}</span>"#, highlighter.html(tag)))
                .collect();
            format!("  <div class=\"tags\">{spans}</div>\n")
        };
        let pill = if filtered && !card.links.is_empty() {
            let n = card.links.len();
            format!(
                "  <span class=\"match-pill\">{n} {}</span>\n",
                plural(n, "match", "matches")
            )
        } else {
            String::new()
        };
        let links: String = card
            .links
            .iter()
            .map(|link| self.render_link(link, highlighter))
            .collect();

        format!(
            r#"<div class="card" data-group-id="{id}">
  <h2 class="title">{title}</h2>
{desc}{tags}{pill}  <ul class="links">
{links}  </ul>
</div>
"#,
            id = encode_double_quoted_attribute(&card.id),
            title = highlighter.html(&card.title),
        )
    }

    fn render_link(&self, link: &Link, highlighter: &Highlighter) -> String {
        let title = if link.title.is_empty() { &link.url } else { &link.title };
        format!(
            "    <li data-link-id=\"{}\"><a class=\"anchor\" href=\"{}\">{}</a> <span class=\"meta\">{}</span></li>\n",
            encode_double_quoted_attribute(&link.id),
            encode_double_quoted_attribute(&link.url),
            highlighter.html(title),
            highlighter.html(&meta_line(link)),
        )
    }
}

/// `host • date • note`, the note only when present.
pub fn meta_line(link: &Link) -> String {
    let when = DateTime::<Utc>::from_timestamp_millis(link.created_at)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let mut parts = vec![link.host.clone(), when];
    if !link.note.is_empty() {
        parts.push(link.note.clone());
    }
    parts.join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::search;
    use crate::domain::{Group, Store};

    fn store() -> Store {
        let mut store = Store::default();
        let mut group = Group::with_id("g1".to_string(), "Reading <list>", "long reads");
        let mut link = Link::new("https://example.com/?a=1&b=2", "Example", "tutorial");
        link.created_at = 0;
        group.links.push(link);
        group.add_tags(["demo"]);
        store.groups.insert(group.id.clone(), group);
        store
    }

    #[test]
    fn given_unfiltered_view_when_rendering_then_escapes_content() {
        let html = HtmlPresenter::new().render(&search(&store(), ""));

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Reading &lt;list&gt;"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=2""#));
        assert!(html.contains(r#"<span class="tag">demo</span>"#));
        assert!(!html.contains("<mark>"));
        assert!(!html.contains("match-pill"));
    }

    #[test]
    fn given_query_when_rendering_then_marks_matches_and_shows_stats() {
        let html = HtmlPresenter::new().render(&search(&store(), "tutorial"));

        assert!(html.contains("<mark>tutorial</mark>"));
        assert!(html.contains("1 card • 1 matching link"));
        assert!(html.contains("1 match</span>"));
    }

    #[test]
    fn given_empty_store_when_rendering_then_shows_empty_state() {
        let html = HtmlPresenter::new().render(&search(&Store::default(), ""));

        assert!(html.contains("No cards yet."));
    }

    #[test]
    fn given_query_without_matches_when_rendering_then_shows_no_match_and_stats() {
        let html = HtmlPresenter::new().render(&search(&store(), "zzz"));

        assert!(html.contains("No matching cards."));
        assert!(html.contains("0 cards • 0 matching links"));
        assert!(!html.contains(r#"class="card""#));
    }

    #[test]
    fn given_link_with_note_when_building_meta_then_joins_parts() {
        let mut link = Link::new("https://a.com", "", "note here");
        link.created_at = 0;

        assert_eq!(meta_line(&link), "a.com • 1970-01-01 00:00 • note here");
    }
}
