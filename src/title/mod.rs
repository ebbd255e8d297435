//! Narrative-to-title extraction
//!
//! A narrative passes through four stages, strictly in order:
//!
//! 1. [`segmenter`] splits it into sentences,
//! 2. [`scorer`] ranks sentences by quotability,
//! 3. [`selector`] picks the best word window from the top sentences,
//! 4. [`distiller`] cleans that window into the final title.
//!
//! Every ranking step uses a stable sort, so equal scores keep discovery order
//! and the same narrative always yields the same title.

pub mod batch;
pub mod distiller;
pub mod scorer;
pub mod segmenter;
pub mod selector;

use log::debug;

use crate::constants::{
    DEFAULT_MAX_WORDS, FALLBACK_TITLE, MAX_SENTENCE_CHARS, MIN_SENTENCE_CHARS, MIN_WINDOW_WORDS,
    TOP_SENTENCES,
};
use crate::error::ExtractError;
use crate::nlp::{Capabilities, StopwordFilter, TermBoundary, TermMatcher};
use crate::vocabulary::Vocabulary;

pub use batch::{TitleReport, assign_titles};
pub use distiller::TitleDistiller;
pub use scorer::CandidateScorer;
pub use segmenter::split_sentences;
pub use selector::{PhraseSelector, Selection, SelectionSource};

/// A sentence of the narrative with its position in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub index: usize,
}

/// A sentence or word window under consideration, with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub score: f64,
}

/// Sort candidates by score, best first. The sort is stable: candidates with
/// equal scores keep the order they were discovered in.
pub fn rank_candidates(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

/// Numeric knobs of the extraction.
#[derive(Debug, Clone)]
pub struct TitleConfig {
    /// Longest title, and longest word window, in words
    pub max_words: usize,
    /// Number of best sentences the selector windows over
    pub top_sentences: usize,
    /// Shortest word window
    pub min_window_words: usize,
    /// Shortest sentence, in characters, that is scored
    pub min_sentence_chars: usize,
    /// Longest sentence, in characters, that is scored
    pub max_sentence_chars: usize,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            top_sentences: TOP_SENTENCES,
            min_window_words: MIN_WINDOW_WORDS,
            min_sentence_chars: MIN_SENTENCE_CHARS,
            max_sentence_chars: MAX_SENTENCE_CHARS,
        }
    }
}

impl TitleConfig {
    /// Set the title word cap
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words.max(1);
        self
    }
}

/// Vocabulary lists compiled into matchers.
#[derive(Debug, Clone)]
pub struct TitleRules {
    pub first_person: TermMatcher,
    pub impact: TermMatcher,
    pub stopwords: StopwordFilter,
    pub key_phrases: TermMatcher,
    pub fillers: TermMatcher,
    /// Lowercase words stripped from the start of a selected phrase
    pub leading_fillers: Vec<String>,
}

impl TitleRules {
    /// Compile the title-related lists of `vocabulary`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Pattern`] if a list cannot be compiled.
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Result<Self, ExtractError> {
        let stopwords = StopwordFilter::from_list(&vocabulary.stop_words);
        if stopwords.is_empty() {
            debug!("No stopwords configured, titles keep every word");
        }

        Ok(Self {
            first_person: TermMatcher::new(&vocabulary.first_person, TermBoundary::WholeWord)?,
            impact: TermMatcher::new(&vocabulary.impact_words, TermBoundary::WordStart)?,
            stopwords,
            key_phrases: TermMatcher::new(&vocabulary.key_phrases, TermBoundary::WordStart)?,
            fillers: TermMatcher::new(&vocabulary.filler_phrases, TermBoundary::WordStart)?,
            leading_fillers: vocabulary
                .leading_fillers
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        })
    }
}

/// Runs the four extraction stages with a fixed vocabulary, configuration and
/// set of analyzers.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    rules: TitleRules,
    config: TitleConfig,
    capabilities: Capabilities,
}

impl TitleExtractor {
    /// Create an extractor.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Pattern`] if the vocabulary cannot be compiled.
    pub fn new(
        vocabulary: &Vocabulary,
        config: TitleConfig,
        capabilities: Capabilities,
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            rules: TitleRules::from_vocabulary(vocabulary)?,
            config,
            capabilities,
        })
    }

    /// Extractor with the default vocabulary, configuration and built-in analyzers.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Pattern`] if the default vocabulary cannot be compiled.
    pub fn with_defaults() -> Result<Self, ExtractError> {
        Self::new(
            &Vocabulary::default(),
            TitleConfig::default(),
            Capabilities::builtin(),
        )
    }

    pub fn config(&self) -> &TitleConfig {
        &self.config
    }

    pub fn rules(&self) -> &TitleRules {
        &self.rules
    }

    pub fn scorer(&self) -> CandidateScorer<'_> {
        CandidateScorer::new(&self.rules, &self.config, self.capabilities.sentiment.get())
    }

    pub fn selector(&self) -> PhraseSelector<'_> {
        PhraseSelector::new(&self.rules, &self.config, &self.capabilities.syntax)
    }

    pub fn distiller(&self) -> TitleDistiller<'_> {
        TitleDistiller::new(&self.rules, self.config.max_words)
    }

    /// Extract a title from a narrative.
    ///
    /// Empty narratives and narratives without usable candidates produce the
    /// fallback title rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SyntaxUnavailable`] when word windows must be
    /// scored but no syntax analyzer is loaded.
    pub fn extract(&self, narrative: &str) -> Result<String, ExtractError> {
        let sentences = split_sentences(narrative);
        if sentences.is_empty() {
            return Ok(self.distiller().distill(narrative.trim(), narrative));
        }

        let ranked = self.scorer().rank(&sentences);
        let selection = self.selector().select(&ranked)?;
        debug!("Selected {:?} phrase: {}", selection.source, selection.phrase);

        Ok(match selection.source {
            SelectionSource::Fallback => FALLBACK_TITLE.to_string(),
            SelectionSource::Window | SelectionSource::SentenceHead => {
                self.distiller().distill(&selection.phrase, narrative)
            }
        })
    }
}

/// Extract a title with the default vocabulary and built-in analyzers.
/// Always returns a non-empty title; any failure yields the fallback title.
pub fn extract_title(narrative: &str) -> String {
    TitleExtractor::with_defaults()
        .and_then(|extractor| extractor.extract(narrative))
        .unwrap_or_else(|_| FALLBACK_TITLE.to_string())
}
