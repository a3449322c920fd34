//! URL extraction and link-obfuscation signals
//!
//! Phishing mail often defangs links (`hxxp://`, `example[.]com`,
//! `example dot com`) to slip past naive link scanners. Extraction rewrites
//! defanged schemes to their canonical form; the obfuscation flag is a
//! separate heuristic over the whole text.

use regex::Regex;
use std::sync::OnceLock;

static URL_PATTERN: OnceLock<Regex> = OnceLock::new();
static OBFUSCATION_PATTERN: OnceLock<Regex> = OnceLock::new();
static DEFANGED_SCHEME: OnceLock<Regex> = OnceLock::new();

/// Characters a greedy match drags along from surrounding prose.
const TRAILING_PUNCTUATION: &[char] = &[')', '{', '.', ',', ';', '!', ']', '?', '"', '\''];

fn url_pattern() -> &'static Regex {
    URL_PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\b(?:hxxps?|https?)://[^\s<>'"]+|\bwww\.[^\s<>'"]+"#)
            .expect("valid regex")
    })
}

fn obfuscation_pattern() -> &'static Regex {
    OBFUSCATION_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bhxxp\b|\s+dot\s+|\[.\]|\(.\)").expect("valid regex")
    })
}

fn defanged_scheme() -> &'static Regex {
    DEFANGED_SCHEME.get_or_init(|| Regex::new(r"(?i)^hxxp(s?)://").expect("valid regex"))
}

/// Find every URL-like substring and return it in canonical form.
///
/// Order follows the text and repeats are kept, so a link that appears
/// twice counts twice.
pub fn extract_urls(text: &str) -> Vec<String> {
    url_pattern()
        .find_iter(text)
        .map(|m| canonicalize(m.as_str()))
        .collect()
}

/// Canonicalize one raw match: strip trailing punctuation, add a scheme to
/// bare `www.` hosts, and re-fang `hxxp`/`hxxps`.
///
/// Interior obfuscation such as `[.]` is left alone.
pub fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim_end_matches(TRAILING_PUNCTUATION);

    let with_scheme = if starts_with_ignore_case(trimmed, "www.") {
        format!("http://{trimmed}")
    } else {
        trimmed.to_string()
    };

    defanged_scheme()
        .replace(&with_scheme, |caps: &regex::Captures<'_>| {
            if caps[1].is_empty() {
                "http://"
            } else {
                "https://"
            }
        })
        .into_owned()
}

/// True when the text shows any link-evasion pattern: the word `hxxp`
/// (including an `hxxp://` scheme, but not `hxxps`), a spelled-out ` dot `,
/// or a single character wrapped in `[]` or `()`.
///
/// Independent of whether any URL was extracted.
pub fn has_obfuscation(text: &str) -> bool {
    obfuscation_pattern().is_match(text)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
