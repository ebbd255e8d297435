//! Phrase selection over word windows
//!
//! From the best-ranked sentences, every contiguous window of `max_words`
//! down to the minimum window length is scored for structure:
//! +3 when it has a subject and a verb (else +1), and +1 more when it
//! contains an impact term. The first best window wins.

use log::trace;

use super::{Candidate, TitleConfig, TitleRules, rank_candidates};
use crate::constants::FALLBACK_TITLE;
use crate::error::ExtractError;
use crate::nlp::tokenizer::{normalize_word, words};
use crate::nlp::{Capability, SyntaxAnalyzer};

const COMPLETE_WEIGHT: f64 = 3.0;
const FRAGMENT_WEIGHT: f64 = 1.0;
const IMPACT_BONUS: f64 = 1.0;

/// Characters trimmed from both ends of a sentence before windowing.
const EDGE_CHARS: &[char] = &['"', '\'', '“', '”', '‘', '’', '.', '!', '?', ' '];

/// Where the selected phrase came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// The best-scored word window.
    Window,
    /// No window could be built; the head of the best sentence.
    SentenceHead,
    /// Nothing usable at all; the fixed fallback title.
    Fallback,
}

/// The phrase handed to the distiller.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub phrase: String,
    pub source: SelectionSource,
}

impl Selection {
    fn fallback() -> Self {
        Self {
            phrase: FALLBACK_TITLE.to_string(),
            source: SelectionSource::Fallback,
        }
    }
}

/// Picks the most complete, most emotive phrase among the top sentences.
pub struct PhraseSelector<'a> {
    rules: &'a TitleRules,
    config: &'a TitleConfig,
    syntax: &'a Capability<dyn SyntaxAnalyzer>,
}

impl<'a> PhraseSelector<'a> {
    pub fn new(
        rules: &'a TitleRules,
        config: &'a TitleConfig,
        syntax: &'a Capability<dyn SyntaxAnalyzer>,
    ) -> Self {
        Self {
            rules,
            config,
            syntax,
        }
    }

    /// Select a phrase from candidates ranked best first.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SyntaxUnavailable`] when there are windows to
    /// score but the syntax capability is missing.
    pub fn select(&self, ranked: &[Candidate]) -> Result<Selection, ExtractError> {
        let top: Vec<String> = ranked
            .iter()
            .take(self.config.top_sentences)
            .map(|candidate| candidate.text.trim_matches(EDGE_CHARS).to_string())
            .collect();

        let windows = self.windows(&top);
        if windows.is_empty() {
            return Ok(self.sentence_head(top.first()));
        }

        let syntax = self.syntax.get().ok_or_else(|| {
            ExtractError::SyntaxUnavailable(
                self.syntax
                    .unavailable_reason()
                    .unwrap_or("not loaded")
                    .to_string(),
            )
        })?;

        let scored = windows
            .into_iter()
            .map(|text| {
                let score = self.window_score(syntax, &text);
                Candidate { text, score }
            })
            .collect();

        let best = rank_candidates(scored).into_iter().next();
        Ok(match best {
            Some(best) => {
                trace!("Selected window scored {}: {}", best.score, best.text);
                Selection {
                    phrase: self.strip_leading_fillers(&best.text),
                    source: SelectionSource::Window,
                }
            }
            None => Selection::fallback(),
        })
    }

    /// All windows of the top sentences, per sentence longest first.
    fn windows(&self, sentences: &[String]) -> Vec<String> {
        let mut windows = Vec::new();
        let min = self.config.min_window_words.max(1);
        if self.config.max_words < min {
            return windows;
        }

        for sentence in sentences {
            let tokens: Vec<&str> = words(sentence).collect();
            for length in (min..=self.config.max_words).rev() {
                windows.extend(tokens.windows(length).map(|window| window.join(" ")));
            }
        }

        windows
    }

    /// Structural score of one window.
    fn window_score(&self, syntax: &dyn SyntaxAnalyzer, window: &str) -> f64 {
        let mut score = if syntax.analyze(window).is_complete() {
            COMPLETE_WEIGHT
        } else {
            FRAGMENT_WEIGHT
        };
        if self.rules.impact.is_match(window) {
            score += IMPACT_BONUS;
        }
        score
    }

    /// The first `max_words` words of the best sentence, or the fallback.
    fn sentence_head(&self, best: Option<&String>) -> Selection {
        let head = best
            .map(|sentence| {
                words(sentence)
                    .take(self.config.max_words)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        if head.is_empty() {
            Selection::fallback()
        } else {
            Selection {
                phrase: head,
                source: SelectionSource::SentenceHead,
            }
        }
    }

    /// Drop conjunctions and articles from the start, keeping at least one word.
    fn strip_leading_fillers(&self, phrase: &str) -> String {
        let tokens: Vec<&str> = words(phrase).collect();
        let skip = tokens
            .iter()
            .take_while(|word| self.rules.leading_fillers.contains(&normalize_word(word)))
            .count()
            .min(tokens.len().saturating_sub(1));

        tokens
            .get(skip..)
            .unwrap_or_default()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Capabilities;
    use crate::vocabulary::Vocabulary;

    fn rules() -> TitleRules {
        TitleRules::from_vocabulary(&Vocabulary::default()).expect("valid vocabulary")
    }

    fn candidate(text: &str, score: f64) -> Candidate {
        Candidate {
            text: text.to_string(),
            score,
        }
    }

    #[test]
    fn test_complete_impact_window_wins() {
        let rules = rules();
        let config = TitleConfig::default();
        let capabilities = Capabilities::builtin();
        let selector = PhraseSelector::new(&rules, &config, &capabilities.syntax);

        let selection = selector
            .select(&[candidate("I refused to stay silent.", 4.0)])
            .expect("syntax available");

        assert_eq!(selection.source, SelectionSource::Window);
        assert_eq!(selection.phrase, "I refused to stay silent");
    }

    #[test]
    fn test_leading_fillers_are_stripped() {
        let rules = rules();
        let config = TitleConfig::default().with_max_words(4);
        let capabilities = Capabilities::builtin();
        let selector = PhraseSelector::new(&rules, &config, &capabilities.syntax);

        assert_eq!(
            selector.strip_leading_fillers("And the boss ignored me"),
            "boss ignored me"
        );
        assert_eq!(selector.strip_leading_fillers("and the"), "the");
    }

    #[test]
    fn test_short_sentences_use_sentence_head() {
        let rules = rules();
        let config = TitleConfig::default();
        let capabilities = Capabilities::builtin().without_syntax("test");
        let selector = PhraseSelector::new(&rules, &config, &capabilities.syntax);

        let selection = selector
            .select(&[candidate("Too short.", 0.0)])
            .expect("no windows, no syntax needed");

        assert_eq!(selection.source, SelectionSource::SentenceHead);
        assert_eq!(selection.phrase, "Too short");
    }

    #[test]
    fn test_empty_candidates_fall_back() {
        let rules = rules();
        let config = TitleConfig::default();
        let capabilities = Capabilities::builtin();
        let selector = PhraseSelector::new(&rules, &config, &capabilities.syntax);

        let selection = selector.select(&[]).expect("nothing to analyze");

        assert_eq!(selection.source, SelectionSource::Fallback);
        assert_eq!(selection.phrase, FALLBACK_TITLE);
    }

    #[test]
    fn test_missing_syntax_fails() {
        let rules = rules();
        let config = TitleConfig::default();
        let capabilities = Capabilities::builtin().without_syntax("model missing");
        let selector = PhraseSelector::new(&rules, &config, &capabilities.syntax);

        let result = selector.select(&[candidate("My boss ignored every complaint I made.", 4.0)]);

        assert!(matches!(
            result,
            Err(ExtractError::SyntaxUnavailable(reason)) if reason == "model missing"
        ));
    }

    #[test]
    fn test_windows_longest_first() {
        let rules = rules();
        let config = TitleConfig::default().with_max_words(5);
        let capabilities = Capabilities::builtin();
        let selector = PhraseSelector::new(&rules, &config, &capabilities.syntax);

        let windows = selector.windows(&["one two three four five six".to_string()]);

        assert_eq!(
            windows,
            vec![
                "one two three four five",
                "two three four five six",
                "one two three four",
                "two three four five",
                "three four five six",
            ]
        );
    }
}
