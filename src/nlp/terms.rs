//! Vocabulary term matching
//!
//! A [`TermMatcher`] compiles an ordered term list into one case-insensitive
//! alternation so a sentence is scanned once regardless of the list size.

use regex::{Regex, RegexBuilder};

/// How a term must line up with word boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermBoundary {
    /// The term must start at a word boundary; `fight` matches `fighting`.
    WordStart,
    /// The term must be a whole word; `we` does not match `were`.
    WholeWord,
}

/// Case-insensitive matcher for a list of words or phrases.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    /// `None` when the term list is empty, so nothing ever matches.
    pattern: Option<Regex>,
    /// Lowercase terms, in configuration order.
    terms: Vec<String>,
}

impl TermMatcher {
    /// Compile a matcher over `terms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined pattern exceeds the regex size limit.
    pub fn new<S: AsRef<str>>(terms: &[S], boundary: TermBoundary) -> Result<Self, regex::Error> {
        let terms: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() {
            return Ok(Self {
                pattern: None,
                terms,
            });
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let source = match boundary {
            TermBoundary::WordStart => format!(r"\b(?:{alternation})"),
            TermBoundary::WholeWord => format!(r"\b(?:{alternation})\b"),
        };
        let pattern = RegexBuilder::new(&source).case_insensitive(true).build()?;

        Ok(Self {
            pattern: Some(pattern),
            terms,
        })
    }

    /// Number of non-overlapping term occurrences in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.pattern
            .as_ref()
            .map_or(0, |pattern| pattern.find_iter(text).count())
    }

    /// Whether any term occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }

    /// Whether `word` contains any term as a plain substring, ignoring case.
    pub fn contained_in(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.terms.iter().any(|term| word.contains(term.as_str()))
    }

    /// The first term, in configuration order, that occurs anywhere in `text`
    /// as a plain substring, ignoring case.
    pub fn first_contained_in(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.terms
            .iter()
            .find(|term| text.contains(term.as_str()))
            .map(String::as_str)
    }

    /// Remove every term occurrence from `text`.
    pub fn strip(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, "").into_owned(),
            None => text.to_string(),
        }
    }
}
