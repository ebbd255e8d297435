//! Lexicon-based sentiment intensity
//!
//! Computes a VADER-style compound score: word valences are summed with
//! negation, booster and contrast (`but`) adjustments, then squashed into
//! `[-1, 1]` with `s / sqrt(s² + 15)`.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;

use super::tokenizer::{normalize_word, words};

/// Normalization constant of the compound score.
const ALPHA: f64 = 15.0;
/// Valence multiplier for a negated word.
const NEGATION_SCALAR: f64 = -0.74;
/// Valence added (in the word's direction) by a preceding booster.
const BOOSTER_INCREMENT: f64 = 0.293;
/// Valence added per exclamation mark, up to four.
const EXCLAMATION_INCREMENT: f64 = 0.292;
/// How many preceding words a negation reaches.
const NEGATION_WINDOW: usize = 3;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "cannot", "can't",
    "don't", "didn't", "doesn't", "isn't", "wasn't", "weren't", "won't", "wouldn't", "couldn't",
    "shouldn't", "haven't", "hasn't", "hadn't", "without",
];

const BOOSTERS: &[&str] = &[
    "absolutely",
    "completely",
    "deeply",
    "especially",
    "extremely",
    "incredibly",
    "really",
    "so",
    "totally",
    "truly",
    "utterly",
    "very",
];

/// Built-in valences, roughly on VADER's -4..4 scale.
const LEXICON: &[(&str, f64)] = &[
    ("abuse", -3.2),
    ("abused", -3.1),
    ("afraid", -2.2),
    ("alone", -1.0),
    ("amazed", 2.2),
    ("anger", -2.7),
    ("angry", -2.3),
    ("anxious", -1.0),
    ("ashamed", -2.1),
    ("assault", -2.8),
    ("awful", -2.0),
    ("bad", -2.5),
    ("battle", -1.6),
    ("battled", -1.6),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("bias", -0.4),
    ("biased", -1.1),
    ("brave", 2.4),
    ("broken", -2.1),
    ("complaint", -1.5),
    ("confused", -1.3),
    ("cruel", -2.8),
    ("denied", -1.9),
    ("depressed", -2.3),
    ("disgusted", -2.4),
    ("discriminated", -1.8),
    ("discrimination", -2.0),
    ("dismissed", -1.5),
    ("dream", 1.0),
    ("embarrassed", -1.5),
    ("encouraged", 1.5),
    ("equal", 1.0),
    ("excited", 2.2),
    ("excluded", -1.6),
    ("fair", 1.3),
    ("fear", -2.2),
    ("fight", -1.6),
    ("forced", -2.0),
    ("free", 2.3),
    ("frustrated", -1.5),
    ("good", 1.9),
    ("great", 3.1),
    ("happier", 2.4),
    ("happy", 2.7),
    ("harassed", -2.5),
    ("harassment", -2.5),
    ("hate", -2.7),
    ("helpless", -2.0),
    ("hope", 1.9),
    ("hopeless", -2.0),
    ("hurt", -2.4),
    ("ignored", -1.3),
    ("inequality", -1.8),
    ("injustice", -2.7),
    ("insulted", -2.3),
    ("isolated", -1.3),
    ("joy", 2.8),
    ("kind", 2.4),
    ("livid", -2.6),
    ("love", 3.2),
    ("lucky", 1.8),
    ("marginalized", -1.7),
    ("mocked", -1.8),
    ("oppression", -2.6),
    ("overlooked", -0.1),
    ("pain", -2.3),
    ("painful", -2.4),
    ("powerless", -2.2),
    ("proud", 2.1),
    ("racist", -3.1),
    ("refused", -1.2),
    ("rejected", -1.7),
    ("respect", 2.1),
    ("respected", 2.1),
    ("sad", -2.1),
    ("safe", 1.9),
    ("scared", -1.9),
    ("sexist", -2.6),
    ("shame", -2.1),
    ("shocked", -1.3),
    ("sick", -2.3),
    ("silent", -0.4),
    ("silly", 0.1),
    ("strength", 2.2),
    ("strong", 2.3),
    ("struggle", -1.3),
    ("struggled", -1.2),
    ("stupid", -2.4),
    ("success", 2.7),
    ("support", 1.7),
    ("suspicious", -1.5),
    ("terrible", -2.1),
    ("thank", 1.5),
    ("threatened", -2.0),
    ("trouble", -1.7),
    ("unfair", -2.1),
    ("unsafe", -2.2),
    ("upset", -1.6),
    ("victim", -2.2),
    ("violence", -3.1),
    ("weak", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Capability interface: compound polarity of a sentence in `[-1, 1]`.
pub trait SentimentAnalyzer: Send + Sync {
    /// Compound polarity of `text`; `0.0` for neutral or unknown text.
    fn compound(&self, text: &str) -> f64;
}

/// Sentiment analyzer backed by a word → valence table.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    valences: FxHashMap<String, f64>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentiment {
    /// Create an analyzer with the built-in lexicon
    pub fn new() -> Self {
        Self::from_entries(LEXICON.iter().map(|(w, v)| (w.to_string(), *v)))
    }

    /// Create an analyzer from explicit `(word, valence)` entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let valences = entries
            .into_iter()
            .map(|(word, valence)| (word.to_lowercase(), valence))
            .collect();
        Self { valences }
    }

    /// Load a lexicon file in the VADER layout: one entry per line, the token
    /// and its mean valence separated by a tab. Further columns are ignored,
    /// as are blank lines and lines starting with `#`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a valence is not a
    /// finite number, or the file holds no entries.
    pub fn from_lexicon_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sentiment lexicon: {}", path.display()))?;

        let mut entries = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut columns = line.split('\t');
            let (Some(word), Some(valence)) = (columns.next(), columns.next()) else {
                anyhow::bail!("{}:{}: expected <word>\\t<valence>", path.display(), line_no + 1);
            };
            let valence: f64 = valence.trim().parse().with_context(|| {
                format!("{}:{}: invalid valence {valence:?}", path.display(), line_no + 1)
            })?;
            if !valence.is_finite() {
                anyhow::bail!(
                    "{}:{}: valence must be a finite number, got {valence}",
                    path.display(),
                    line_no + 1
                );
            }
            entries.push((word.trim().to_string(), valence));
        }

        if entries.is_empty() {
            anyhow::bail!("Sentiment lexicon {} has no entries", path.display());
        }

        Ok(Self::from_entries(entries))
    }

    /// Number of words in the lexicon
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// Check if the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    /// Sum of adjusted valences before normalization
    fn raw_score(&self, text: &str) -> f64 {
        let tokens: Vec<String> = words(text).map(normalize_word).collect();
        let but_index = tokens.iter().position(|t| t == "but");

        let mut total = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.valences.get(token) else {
                continue;
            };
            let mut valence = base;

            let preceding = tokens.get(i.saturating_sub(NEGATION_WINDOW)..i);
            if let Some(previous) = preceding.and_then(|p| p.last())
                && BOOSTERS.contains(&previous.as_str())
            {
                valence += BOOSTER_INCREMENT * valence.signum();
            }
            if preceding.is_some_and(|p| p.iter().any(|t| NEGATIONS.contains(&t.as_str()))) {
                valence *= NEGATION_SCALAR;
            }

            // Contrast: what follows "but" outweighs what precedes it.
            match but_index {
                Some(b) if i < b => valence *= 0.5,
                Some(b) if i > b => valence *= 1.5,
                _ => {}
            }

            total += valence;
        }

        if total != 0.0 {
            let exclamations = text.matches('!').count().min(4) as f64;
            total += EXCLAMATION_INCREMENT * exclamations * total.signum();
        }

        total
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn compound(&self, text: &str) -> f64 {
        let score = self.raw_score(text);
        if score == 0.0 {
            return 0.0;
        }
        (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_neutral_text_is_zero() {
        let analyzer = LexiconSentiment::new();

        assert_eq!(analyzer.compound("He said you should wear makeup to work."), 0.0);
        assert_eq!(analyzer.compound(""), 0.0);
    }

    #[test]
    fn test_polarity_direction() {
        let analyzer = LexiconSentiment::new();

        assert!(analyzer.compound("I was so happy and proud.") > 0.5);
        assert!(analyzer.compound("It was unfair and painful.") < -0.5);
    }

    #[test]
    fn test_negation_flips() {
        let analyzer = LexiconSentiment::new();

        let plain = analyzer.compound("It was fair.");
        let negated = analyzer.compound("It was not fair.");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_compound_is_bounded() {
        let analyzer = LexiconSentiment::new();
        let text = "abuse violence racist worst abuse violence racist worst!!!!";

        let score = analyzer.compound(text);
        assert!((-1.0..=1.0).contains(&score));
        assert!(score < -0.9);
    }

    #[test]
    fn test_custom_entries() {
        let analyzer = LexiconSentiment::from_entries([("unheard".to_string(), -2.0)]);

        assert_eq!(analyzer.len(), 1);
        assert!(analyzer.compound("I felt unheard") < 0.0);
    }

    #[test]
    fn test_lexicon_file_rejects_non_finite_valences() {
        for valence in ["nan", "inf", "-inf"] {
            let mut file = tempfile::NamedTempFile::new().expect("temp file");
            writeln!(file, "boss\t{valence}").expect("write lexicon");

            assert!(LexiconSentiment::from_lexicon_file(file.path()).is_err());
        }
    }

    #[test]
    fn test_lexicon_file_loads() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "# word\tvalence\nunheard\t-2.1\t0.5").expect("write lexicon");

        let analyzer = LexiconSentiment::from_lexicon_file(file.path()).expect("valid lexicon");
        assert_eq!(analyzer.len(), 1);
        assert!(analyzer.compound("I felt unheard") < 0.0);
    }
}
