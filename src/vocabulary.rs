//! Word lists driving the heuristics.
//!
//! Every list has a built-in default (see [`crate::constants`]) and can be
//! overridden from a JSON file. Fields missing from the file keep their
//! defaults, so a file may override only the impact words, for example:
//!
//! ```json
//! { "impact_words": ["struggle", "ignored", "glass ceiling"] }
//! ```

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{
    COUNTRIES, COUNTRY_SYNONYMS, FILLER_PHRASES, FIRST_PERSON_WORDS, IMPACT_WORDS, KEY_PHRASES,
    LEADING_FILLERS, STOP_WORDS, THEMES,
};

/// A named theme and the keywords that vote for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeKeywords {
    pub name: String,
    pub keywords: Vec<String>,
}

/// An alternate spelling of a country, matched before full country names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySynonym {
    pub alias: String,
    pub country: String,
}

/// Ordered configuration lists. Order matters wherever the first match wins
/// (key phrases, themes, synonyms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Pronouns signalling a first-person account.
    pub first_person: Vec<String>,
    /// Emotive words and phrases rewarded by the scorer and selector.
    pub impact_words: Vec<String>,
    /// Words dropped when distilling a title.
    pub stop_words: Vec<String>,
    /// Domain phrases that anchor a title when present.
    pub key_phrases: Vec<String>,
    /// Lead-in phrases removed before distilling.
    pub filler_phrases: Vec<String>,
    /// Words stripped from the start of a selected phrase.
    pub leading_fillers: Vec<String>,
    pub themes: Vec<ThemeKeywords>,
    pub country_synonyms: Vec<CountrySynonym>,
    pub countries: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            first_person: owned(FIRST_PERSON_WORDS),
            impact_words: owned(IMPACT_WORDS),
            stop_words: owned(STOP_WORDS),
            key_phrases: owned(KEY_PHRASES),
            filler_phrases: owned(FILLER_PHRASES),
            leading_fillers: owned(LEADING_FILLERS),
            themes: THEMES
                .iter()
                .map(|(name, keywords)| ThemeKeywords {
                    name: name.to_string(),
                    keywords: owned(keywords),
                })
                .collect(),
            country_synonyms: COUNTRY_SYNONYMS
                .iter()
                .map(|(alias, country)| CountrySynonym {
                    alias: alias.to_string(),
                    country: country.to_string(),
                })
                .collect(),
            countries: owned(COUNTRIES),
        }
    }
}

impl Vocabulary {
    /// Reads a vocabulary from a JSON file, filling unspecified lists with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON for
    /// this structure.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;
        let vocabulary: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid vocabulary file: {}", path.display()))?;
        debug!(
            "Loaded vocabulary from {} ({} impact words, {} key phrases)",
            path.display(),
            vocabulary.impact_words.len(),
            vocabulary.key_phrases.len()
        );
        Ok(vocabulary)
    }

    /// Loads the vocabulary from `path` when given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is given and [`Vocabulary::from_file`] fails.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::default()),
        }
    }
}
