// src/util/text.rs

/// Split a comma separated list into trimmed, non-empty entries.
///
/// # Examples
///
/// ```
/// use linkcards::util::text::split_comma_list;
///
/// let tags = split_comma_list("tutorial, demo,, ");
/// assert_eq!(tags, vec!["tutorial", "demo"]);
/// ```
pub fn split_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// English plural suffix helper for counters in status lines.
pub fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
