// Text normalization applied before every lexicon lookup.
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());

/// Lowercases, drops HTML tags, URLs and control characters, and collapses whitespace.
///
/// Whitespace is collapsed before tag stripping so a tag split across lines is still
/// removed, and again afterwards so removed spans never leave double spaces behind.
/// The result is a fixed point: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let without_tags = HTML_TAG.replace_all(&collapsed, "");
    let without_urls = URL.replace_all(&without_tags, "");

    WHITESPACE
        .replace_all(&without_urls, " ")
        .trim()
        .to_string()
}

/// Cleans stored review text without changing its case: drops HTML tags, byte-order
/// marks and control characters, and collapses whitespace (including non-breaking
/// spaces). Used when repairing stored data, where the original wording is kept.
/// Like [`normalize`], the result is a fixed point.
pub fn clean_text(text: &str) -> String {
    let visible: String = text
        .chars()
        .filter(|c| *c != '\u{feff}')
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let without_tags = HTML_TAG.replace_all(&visible, " ");
    WHITESPACE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Same as [`normalize`] for values that may be missing.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
