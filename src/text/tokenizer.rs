//! Word tokenizer for normalized text

/// Characters that can appear inside a token: ASCII lowercase letters,
/// ASCII digits and the apostrophe.
#[inline]
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '\''
}

/// Split text into maximal runs of token characters.
///
/// Input is lowercased first, so callers may pass raw text as well as
/// normalized text. Every other character is a separator and is dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !is_token_char(c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
