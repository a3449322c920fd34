//! Text preparation shared by every scoring stage
//!
//! Normalization and tokenization are pure functions. Scoring runs on the
//! normalized form; URL extraction works on the original text instead.

mod normalizer;
mod tokenizer;

pub use normalizer::normalize;
pub use tokenizer::{is_token_char, tokenize};
