//! Sentence quotability scoring
//!
//! Each sentence collects independent additive signals:
//!
//! | signal        | contribution                                  |
//! |---------------|-----------------------------------------------|
//! | first person  | +2 if `I`, `my`, `we` or `our` appears        |
//! | impact words  | +2 per impact term occurrence                 |
//! | sentiment     | +3 × \|compound\| (0 without an analyzer)     |
//! | quotation     | +2 if a double quotation mark appears         |

use log::trace;

use super::{Candidate, Sentence, TitleConfig, TitleRules, rank_candidates};
use crate::nlp::SentimentAnalyzer;

const FIRST_PERSON_WEIGHT: f64 = 2.0;
const IMPACT_WEIGHT: f64 = 2.0;
const SENTIMENT_WEIGHT: f64 = 3.0;
const QUOTATION_WEIGHT: f64 = 2.0;

const QUOTATION_MARKS: &[char] = &['"', '“', '”'];

/// Scores sentences and ranks them into candidates.
pub struct CandidateScorer<'a> {
    rules: &'a TitleRules,
    config: &'a TitleConfig,
    sentiment: Option<&'a dyn SentimentAnalyzer>,
}

impl<'a> CandidateScorer<'a> {
    pub fn new(
        rules: &'a TitleRules,
        config: &'a TitleConfig,
        sentiment: Option<&'a dyn SentimentAnalyzer>,
    ) -> Self {
        Self {
            rules,
            config,
            sentiment,
        }
    }

    /// Quotability score of a single sentence; never negative.
    pub fn score(&self, sentence: &str) -> f64 {
        let mut score = 0.0;

        if self.rules.first_person.is_match(sentence) {
            score += FIRST_PERSON_WEIGHT;
        }

        score += IMPACT_WEIGHT * self.rules.impact.count(sentence) as f64;

        if let Some(sentiment) = self.sentiment {
            score += SENTIMENT_WEIGHT * sentiment.compound(sentence).abs();
        }

        if sentence.contains(QUOTATION_MARKS) {
            score += QUOTATION_WEIGHT;
        }

        score
    }

    /// Whether a sentence's length is inside the configured character range.
    pub fn is_eligible(&self, sentence: &str) -> bool {
        let len = sentence.chars().count();
        len >= self.config.min_sentence_chars && len <= self.config.max_sentence_chars
    }

    /// Score the eligible sentences and rank them best first. When no
    /// sentence has an eligible length, every sentence is scored instead.
    pub fn rank(&self, sentences: &[Sentence]) -> Vec<Candidate> {
        let eligible: Vec<&Sentence> = sentences
            .iter()
            .filter(|s| self.is_eligible(&s.text))
            .collect();

        let pool: Vec<&Sentence> = if eligible.is_empty() {
            sentences.iter().collect()
        } else {
            eligible
        };

        let candidates = pool
            .into_iter()
            .map(|sentence| {
                let score = self.score(&sentence.text);
                trace!("Sentence {} scored {score:.3}: {}", sentence.index, sentence.text);
                Candidate {
                    text: sentence.text.clone(),
                    score,
                }
            })
            .collect();

        rank_candidates(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::LexiconSentiment;
    use crate::title::split_sentences;
    use crate::vocabulary::Vocabulary;

    fn rules() -> TitleRules {
        TitleRules::from_vocabulary(&Vocabulary::default()).expect("valid vocabulary")
    }

    #[test]
    fn test_first_person_and_impact() {
        let rules = rules();
        let config = TitleConfig::default();
        let scorer = CandidateScorer::new(&rules, &config, None);

        assert_eq!(scorer.score("I refused to stay silent."), 4.0);
        assert_eq!(scorer.score("The weather was mild that day."), 0.0);
        assert_eq!(scorer.score("They fight and fight."), 4.0);
    }

    #[test]
    fn test_quotation_bonus() {
        let rules = rules();
        let config = TitleConfig::default();
        let scorer = CandidateScorer::new(&rules, &config, None);

        let quoted = scorer.score(r#"He said, "You should wear makeup to work.""#);
        let plain = scorer.score("He said, You should wear makeup to work.");
        assert_eq!(quoted - plain, 2.0);
    }

    #[test]
    fn test_sentiment_adds_intensity() {
        let rules = rules();
        let config = TitleConfig::default();
        let sentiment = LexiconSentiment::new();
        let with = CandidateScorer::new(&rules, &config, Some(&sentiment));
        let without = CandidateScorer::new(&rules, &config, None);

        let sentence = "It was so painful and unfair to them.";
        assert!(with.score(sentence) > without.score(sentence));
    }

    #[test]
    fn test_length_filter_with_fallback() {
        let rules = rules();
        let config = TitleConfig::default();
        let scorer = CandidateScorer::new(&rules, &config, None);

        let ranked = scorer.rank(&split_sentences("Too short. I refused to stay silent."));
        assert_eq!(ranked.len(), 1);

        let ranked = scorer.rank(&split_sentences("Too short."));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.first().map(|c| c.text.as_str()), Some("Too short."));
    }

    #[test]
    fn test_ties_keep_document_order() {
        let rules = rules();
        let config = TitleConfig::default();
        let scorer = CandidateScorer::new(&rules, &config, None);

        let ranked = scorer.rank(&split_sentences(
            "The sky was grey all day. The road was long and flat. I refused to go there.",
        ));
        let texts: Vec<_> = ranked.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "I refused to go there.",
                "The sky was grey all day.",
                "The road was long and flat."
            ]
        );
    }
}
