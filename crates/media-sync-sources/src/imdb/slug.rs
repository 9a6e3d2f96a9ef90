/// Turn a free-text list name into a Trakt-safe list slug.
///
/// Lowercases, joins whitespace-separated words with single hyphens, then drops
/// every character outside `[a-z0-9-]`. The output is a fixed point:
/// `normalize_slug(&normalize_slug(s)) == normalize_slug(s)`.
pub fn normalize_slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'))
        .collect()
}
