//! Plain-text extraction from HTML, used to keep prompts small.

use regex::Regex;
use std::sync::OnceLock;

struct Patterns {
    script: Regex,
    style: Regex,
    tag: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        script: Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script pattern"),
        style: Regex::new(r"(?is)<style\b.*?</style\s*>").expect("valid style pattern"),
        tag: Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"),
        whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
    })
}

/// Strips scripts, styles and tags, then collapses whitespace.
pub fn extract_text(html: &str) -> String {
    let p = patterns();
    let text = p.script.replace_all(html, " ");
    let text = p.style.replace_all(&text, " ");
    let text = p.tag.replace_all(&text, " ");
    let text = p.whitespace.replace_all(&text, " ");
    text.trim().to_string()
}

/// Returns at most `max_chars` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
