//! Shallow syntax analysis
//!
//! The phrase selector only needs to know whether a word window reads as a
//! complete thought: does it have a subject and a verb? [`LexiconSyntax`]
//! answers that with a closed-class word lexicon plus suffix rules, which is
//! enough for short first-person narrative phrases.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::tokenizer::{normalize_word, words};

/// Coarse word classes, named after Universal Dependencies POS tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    /// Subject pronoun (`I`, `she`, `they`)
    Pronoun,
    /// Object or possessive pronoun (`me`, `him`, `my`)
    ObjectPronoun,
    Verb,
    Auxiliary,
    Determiner,
    Adposition,
    Conjunction,
    Adverb,
    Particle,
    /// Anything else; treated as noun-like
    Other,
}

impl FromStr for WordClass {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_uppercase().as_str() {
            "PRON" => Ok(Self::Pronoun),
            "OBJ" | "POSS" => Ok(Self::ObjectPronoun),
            "VERB" => Ok(Self::Verb),
            "AUX" => Ok(Self::Auxiliary),
            "DET" => Ok(Self::Determiner),
            "ADP" => Ok(Self::Adposition),
            "CCONJ" | "SCONJ" => Ok(Self::Conjunction),
            "ADV" => Ok(Self::Adverb),
            "PART" => Ok(Self::Particle),
            "X" | "NOUN" | "PROPN" | "ADJ" => Ok(Self::Other),
            _ => Err(format!("Unknown word class: {input}")),
        }
    }
}

impl WordClass {
    fn is_verbal(self) -> bool {
        matches!(self, Self::Verb | Self::Auxiliary)
    }

    /// Whether a word of this class can head the subject of a following verb.
    fn can_be_subject(self) -> bool {
        matches!(self, Self::Pronoun | Self::Other)
    }
}

/// What the syntax analyzer found in a phrase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyntaxFeatures {
    pub has_subject: bool,
    pub has_verb: bool,
}

impl SyntaxFeatures {
    /// A subject and a verb: the phrase reads as a complete thought.
    pub fn is_complete(&self) -> bool {
        self.has_subject && self.has_verb
    }
}

/// Capability interface: subject/verb detection for a phrase.
pub trait SyntaxAnalyzer: Send + Sync {
    fn analyze(&self, phrase: &str) -> SyntaxFeatures;
}

const PRONOUNS: &[&str] = &[
    "i", "we", "you", "he", "she", "they", "it", "who", "i'm", "i've", "i'd", "we're", "they're",
    "he's", "she's", "it's", "someone", "everyone", "nobody", "people",
];
const OBJECT_PRONOUNS: &[&str] = &[
    "me", "us", "him", "her", "them", "my", "our", "your", "his", "their", "its", "mine",
    "myself", "herself", "himself", "themselves",
];
const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "can", "could", "should", "shall", "may", "might", "must", "don't",
    "didn't", "wasn't", "weren't", "won't", "wouldn't", "couldn't", "can't", "isn't",
];
const VERBS: &[&str] = &[
    "ask", "become", "believe", "call", "come", "cut", "drive", "eat", "feel", "felt", "find",
    "get", "give", "go", "got", "gave", "grew", "hear", "help", "hold", "keep", "kept", "knew",
    "know", "leave", "left", "let", "like", "make", "made", "mean", "meet", "met", "need", "pay",
    "paid", "put", "read", "run", "said", "say", "see", "saw", "seem", "sent", "speak", "spoke",
    "stand", "stay", "stop", "take", "took", "talk", "teach", "taught", "tell", "think",
    "thought", "told", "treat", "try", "turn", "understand", "use", "walk", "want", "wear",
    "went", "work", "write", "wrote",
];
const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "all", "both", "another", "such",
];
const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "from", "up", "down", "of", "off", "over",
    "under", "like", "as", "than",
];
const CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "nor", "so", "because", "if", "while", "although", "though", "when",
    "until", "since", "unless", "whether",
];
const ADVERBS: &[&str] = &[
    "never", "always", "not", "very", "too", "just", "also", "even", "still", "only", "then",
    "there", "here", "now", "again", "ever", "really", "often", "constantly", "rarely",
];
const PARTICLES: &[&str] = &["to"];
/// Nouns the suffix rules would otherwise take for verbs.
const NOUNS: &[&str] = &[
    "anything", "building", "ceiling", "clothing", "evening", "everything", "feeling", "funding",
    "housing", "hundred", "meeting", "morning", "nothing", "something", "speed", "spring",
    "string", "thing", "training", "wedding",
];

/// Lexicon + suffix heuristic syntax analyzer.
#[derive(Debug, Clone)]
pub struct LexiconSyntax {
    classes: FxHashMap<String, WordClass>,
}

impl Default for LexiconSyntax {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSyntax {
    /// Create an analyzer with the built-in closed-class lexicon
    pub fn new() -> Self {
        let groups: [(&[&str], WordClass); 10] = [
            (NOUNS, WordClass::Other),
            (DETERMINERS, WordClass::Determiner),
            (ADPOSITIONS, WordClass::Adposition),
            (CONJUNCTIONS, WordClass::Conjunction),
            (ADVERBS, WordClass::Adverb),
            (PARTICLES, WordClass::Particle),
            (VERBS, WordClass::Verb),
            (AUXILIARIES, WordClass::Auxiliary),
            (OBJECT_PRONOUNS, WordClass::ObjectPronoun),
            (PRONOUNS, WordClass::Pronoun),
        ];

        let mut classes = FxHashMap::default();
        // Later groups win for words listed twice, so "like" ends up a verb.
        for (list, class) in groups {
            for word in list {
                classes.insert(word.to_string(), class);
            }
        }
        Self { classes }
    }

    /// Load extra entries on top of the built-in lexicon. One entry per line:
    /// a word and a tag (`PRON`, `OBJ`, `VERB`, `AUX`, `DET`, `ADP`, `CCONJ`,
    /// `ADV`, `PART`, `NOUN`) separated by a tab. Blank lines and `#` comments
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line has an unknown tag.
    pub fn from_lexicon_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read syntax lexicon: {}", path.display()))?;

        let mut syntax = Self::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, tag) = line.split_once('\t').with_context(|| {
                format!("{}:{}: expected <word>\\t<tag>", path.display(), line_no + 1)
            })?;
            let class = tag
                .parse::<WordClass>()
                .map_err(|e| anyhow::anyhow!("{}:{}: {e}", path.display(), line_no + 1))?;
            syntax.classes.insert(word.trim().to_lowercase(), class);
        }

        Ok(syntax)
    }

    /// Classify a single word
    pub fn classify(&self, word: &str) -> WordClass {
        let word = normalize_word(word);
        if let Some(class) = self.classes.get(&word) {
            return *class;
        }

        let len = word.chars().count();
        if (word.ends_with("ed") && len > 4) || (word.ends_with("ing") && len > 5) {
            WordClass::Verb
        } else if word.ends_with("ly") && len > 4 {
            WordClass::Adverb
        } else {
            WordClass::Other
        }
    }
}

impl SyntaxAnalyzer for LexiconSyntax {
    fn analyze(&self, phrase: &str) -> SyntaxFeatures {
        let classes: Vec<WordClass> = words(phrase)
            .map(|w| self.classify(w))
            .collect();

        let Some(first_verb) = classes.iter().position(|c| c.is_verbal()) else {
            return SyntaxFeatures::default();
        };

        let has_subject = classes
            .get(..first_verb)
            .is_some_and(|before| before.iter().any(|c| c.can_be_subject()));

        SyntaxFeatures {
            has_subject,
            has_verb: true,
        }
    }
}
