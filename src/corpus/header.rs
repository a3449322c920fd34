//! Subject extraction from `Header:` lines

use regex::Regex;
use std::sync::OnceLock;

static HEADER_PATTERN: OnceLock<Regex> = OnceLock::new();

/// `header:` at the start of a line, horizontal whitespace allowed around
/// the word and the colon. Never spans lines.
fn header_pattern() -> &'static Regex {
    HEADER_PATTERN.get_or_init(|| {
        Regex::new(r"(?im)^[^\S\n]*header[^\S\n]*:[^\S\n]*(.+)$").expect("valid regex")
    })
}

/// Remainder of the first `header:` line, trimmed. `None` when no line matches.
pub fn extract_subject(text: &str) -> Option<String> {
    header_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
