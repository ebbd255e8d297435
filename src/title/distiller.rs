//! Title distillation
//!
//! Turns the selected phrase into the final title: filler lead-ins go, key
//! phrases anchor the title, stopwords are dropped, and the result is capped,
//! capitalized and marked with an ellipsis when it was shortened.

use super::TitleRules;
use crate::cleanup::normalize_title_ending;
use crate::constants::FALLBACK_TITLE;
use crate::nlp::tokenizer::{collapse_whitespace, normalize_word, words};

/// Short words are only kept while fewer than this many words were kept.
const SHORT_WORD_QUOTA: usize = 3;
/// Words longer than this many characters are always kept.
const LONG_WORD_CHARS: usize = 4;
/// Extra words appended after a key phrase anchor.
const ANCHOR_EXTRA_WORDS: usize = 2;

pub struct TitleDistiller<'a> {
    rules: &'a TitleRules,
    max_words: usize,
}

impl<'a> TitleDistiller<'a> {
    pub fn new(rules: &'a TitleRules, max_words: usize) -> Self {
        Self { rules, max_words }
    }

    /// Distill `phrase` into a title. Key phrases are looked up in the phrase
    /// first and then in `context` (the whole narrative). Never returns an
    /// empty string.
    pub fn distill(&self, phrase: &str, context: &str) -> String {
        let working = collapse_whitespace(&self.rules.fillers.strip(phrase));
        let tokens: Vec<&str> = words(&working).collect();
        let meaningful = self.meaningful_words(&tokens);

        let anchor = self
            .rules
            .key_phrases
            .first_contained_in(&working)
            .or_else(|| self.rules.key_phrases.first_contained_in(context));

        let mut title_words: Vec<&str> = match anchor {
            Some(core) => {
                let extras = meaningful
                    .iter()
                    .filter(|word| {
                        let normalized = normalize_word(word);
                        !normalized.is_empty() && !core.contains(normalized.as_str())
                    })
                    .take(ANCHOR_EXTRA_WORDS);
                words(core).chain(extras.copied()).collect()
            }
            None if meaningful.is_empty() => tokens.clone(),
            None => meaningful,
        };
        title_words.truncate(self.max_words.max(1));

        let title = balance_quotes(
            title_words
                .join(" ")
                .trim_start_matches(|c: char| !c.is_alphanumeric()),
        );
        if title.is_empty() {
            return FALLBACK_TITLE.to_string();
        }

        let title = capitalize_first(&title);
        let title_len = title_words.len();
        if title_len < tokens.len() && title_len > 2 {
            normalize_title_ending(&title)
        } else {
            title
        }
    }

    /// Words worth keeping, in order.
    fn meaningful_words<'w>(&self, tokens: &[&'w str]) -> Vec<&'w str> {
        let mut kept = Vec::new();

        for (i, word) in tokens.iter().enumerate() {
            let is_stopword = self.rules.stopwords.is_stopword(word);
            let is_long = word.chars().count() > LONG_WORD_CHARS;

            // The opening word carries the flow; impact words survive even as stopwords.
            let keep = (i == 0 && !is_stopword)
                || self.rules.impact.contained_in(word)
                || (!is_stopword && (is_long || kept.len() < SHORT_WORD_QUOTA));
            if keep {
                kept.push(*word);
            }
        }

        kept
    }
}

/// Drop every double quote when the quotes in `text` do not pair up.
fn balance_quotes(text: &str) -> String {
    let straight = text.matches('"').count();
    let opening = text.matches('“').count();
    let closing = text.matches('”').count();
    if straight % 2 == 0 && opening == closing {
        return text.to_string();
    }
    collapse_whitespace(&text.replace(['"', '“', '”'], ""))
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Vocabulary;

    fn rules() -> TitleRules {
        TitleRules::from_vocabulary(&Vocabulary::default()).expect("valid vocabulary")
    }

    #[test]
    fn test_stopwords_dropped_with_ellipsis() {
        let rules = rules();
        let distiller = TitleDistiller::new(&rules, 7);

        assert_eq!(
            distiller.distill("I refused to stay silent", ""),
            "I refused stay silent..."
        );
    }

    #[test]
    fn test_filler_phrase_removed() {
        let rules = rules();
        let distiller = TitleDistiller::new(&rules, 7);

        assert_eq!(
            distiller.distill("I learned that nobody listens", ""),
            "Nobody listens"
        );
        assert_eq!(
            distiller.distill("Interestingly, nobody listens", ""),
            "Nobody listens"
        );
    }

    #[test]
    fn test_key_phrase_anchor() {
        let rules = rules();
        let distiller = TitleDistiller::new(&rules, 7);

        assert_eq!(
            distiller.distill("I finally hit the glass ceiling at work", ""),
            "Glass ceiling finally hit..."
        );
    }

    #[test]
    fn test_key_phrase_from_context() {
        let rules = rules();
        let distiller = TitleDistiller::new(&rules, 7);

        let title = distiller.distill(
            "nobody would promote me",
            "Years of work. Nobody would promote me. The glass ceiling was real.",
        );
        assert!(title.starts_with("Glass ceiling"));
    }

    #[test]
    fn test_word_cap() {
        let rules = rules();
        let distiller = TitleDistiller::new(&rules, 3);

        let title = distiller.distill("Teachers always praised boys louder than clever girls", "");
        assert_eq!(title, "Teachers always praised...");
    }

    #[test]
    fn test_only_stopwords_keeps_text() {
        let rules = rules();
        let distiller = TitleDistiller::new(&rules, 7);

        assert_eq!(distiller.distill("and then there was", ""), "And then there was");
    }

    #[test]
    fn test_empty_input_falls_back() {
        let rules = rules();
        let distiller = TitleDistiller::new(&rules, 7);

        assert_eq!(distiller.distill("", ""), FALLBACK_TITLE);
        assert_eq!(distiller.distill(" \"... ", ""), FALLBACK_TITLE);
    }

    #[test]
    fn test_cut_quote_is_dropped() {
        let rules = rules();
        let distiller = TitleDistiller::new(&rules, 7);

        for phrase in [
            "He said, \"You should wear makeup to work.\"",
            "\"Smile more,\" my manager told me every single morning",
            "She called it “just a joke” and laughed at my complaint",
            "My teacher said “girls cannot do maths",
        ] {
            let title = distiller.distill(phrase, "");
            assert_eq!(title.matches('"').count() % 2, 0, "{title}");
            assert_eq!(
                title.matches('“').count(),
                title.matches('”').count(),
                "{title}"
            );
        }
    }

    #[test]
    fn test_balance_quotes() {
        assert_eq!(balance_quotes("You should wear makeup.\""), "You should wear makeup.");
        assert_eq!(balance_quotes("Told “no” twice"), "Told “no” twice");
        assert_eq!(balance_quotes("Told “no twice"), "Told no twice");
        assert_eq!(balance_quotes("a \" b"), "a b");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("équipe"), "Équipe");
        assert_eq!(capitalize_first(""), "");
    }
}
