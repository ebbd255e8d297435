//! Sentence segmentation
//!
//! Splits on runs of `.`, `!` and `?` that are followed by whitespace or the
//! end of the text. Closing quotes and brackets right after a terminator stay
//! with the sentence they close, so `He said, "Go home."` is one sentence.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Sentence;
use crate::nlp::tokenizer::collapse_whitespace;

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]+["'”’)\]]*(?:\s|$)"#).expect("Failed to compile SENTENCE_END regex")
});

/// Split a narrative into trimmed, non-empty sentences in document order.
///
/// Newlines are folded into spaces first. Text without terminal punctuation
/// becomes a single sentence; empty or whitespace-only text yields none.
pub fn split_sentences(narrative: &str) -> Vec<Sentence> {
    let text = collapse_whitespace(narrative);

    let mut pieces = Vec::new();
    let mut start = 0;
    for end in SENTENCE_END.find_iter(&text) {
        if let Some(piece) = text.get(start..end.end()) {
            pieces.push(piece);
        }
        start = end.end();
    }
    if let Some(rest) = text.get(start..) {
        pieces.push(rest);
    }

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| piece.chars().any(char::is_alphanumeric))
        .enumerate()
        .map(|(index, text)| Sentence {
            text: text.to_string(),
            index,
        })
        .collect()
}
