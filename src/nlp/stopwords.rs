//! Stopword filtering
//!
//! The title distiller drops stopwords before assembling a title. The list is
//! configuration data (see [`crate::vocabulary::Vocabulary::stop_words`]), so
//! the filter is always built from an explicit list.

use rustc_hash::FxHashSet;

use super::tokenizer::normalize_word;

/// A filter for removing stopwords from text
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    /// Create a stopword filter from a list of words
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let stopwords = words
            .iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stopwords }
    }

    /// Check if a word is a stopword. Surrounding punctuation is ignored,
    /// so `"The` and `that,` are both stopwords.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&normalize_word(word))
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
