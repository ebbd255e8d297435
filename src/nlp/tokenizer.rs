//! Whitespace tokenization
//!
//! Words keep their punctuation so phrases can be rebuilt verbatim;
//! [`normalize_word`] gives the lowercase form used for lookups.

/// Split text into whitespace-separated words.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    words(text).count()
}

/// Lowercase a word and trim surrounding punctuation, keeping inner
/// apostrophes and hyphens (`"Don't,` becomes `don't`).
pub fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Collapse every whitespace run (including newlines) to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    words(text).collect::<Vec<_>>().join(" ")
}
