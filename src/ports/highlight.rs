// src/ports/highlight.rs
use html_escape::encode_text;
use regex::{Regex, RegexBuilder};
use tracing::instrument;

/// Wraps every occurrence of the query's whitespace separated tokens in
/// `<mark>`, escaping the rest of the text for HTML.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(query: &str) -> Self {
        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| regex::escape(&t.to_lowercase()))
            .collect();
        if tokens.is_empty() {
            return Self { pattern: None };
        }

        // Alternation of escaped literals always compiles.
        let pattern = RegexBuilder::new(&format!("({})", tokens.join("|")))
            .case_insensitive(true)
            .build()
            .ok();
        Self { pattern }
    }

    /// HTML-escaped `text` with matches wrapped in `<mark>`.
    #[instrument(level = "trace", skip(self))]
    pub fn html(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return encode_text(text).into_owned();
        };

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in pattern.find_iter(text) {
            out.push_str(&encode_text(&text[last..m.start()]));
            out.push_str("<mark>");
            out.push_str(&encode_text(m.as_str()));
            out.push_str("</mark>");
            last = m.end();
        }
        out.push_str(&encode_text(&text[last..]));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "Rust <book>", "Rust &lt;book&gt;")]
    #[case("rust", "Rust and rustaceans", "<mark>Rust</mark> and <mark>rust</mark>aceans")]
    #[case("tokio  async", "Tokio is async", "<mark>Tokio</mark> is <mark>async</mark>")]
    #[case("a.b", "a.b axb", "<mark>a.b</mark> axb")]
    #[case("amp", "R&D amp", "R&amp;D <mark>amp</mark>")]
    #[case("<b>", "x<b>y", "x<mark>&lt;b&gt;</mark>y")]
    fn given_query_when_highlighting_html_then_marks_and_escapes(
        #[case] query: &str,
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        let highlighter = Highlighter::new(query);

        assert_eq!(highlighter.html(text), expected);
    }

    #[test]
    fn given_whitespace_query_when_highlighting_then_only_escapes() {
        assert_eq!(Highlighter::new("   ").html("a<b"), "a&lt;b");
    }
}
