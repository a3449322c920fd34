//! Whitespace and case normalization

/// Canonicalize line endings, collapse whitespace runs to a single space,
/// trim, and lowercase.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    for word in unified.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    out.to_lowercase()
}
