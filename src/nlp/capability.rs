//! Optional analyzer capabilities
//!
//! Sentiment and syntax analyzers are resolved once, up front, into a
//! [`Capabilities`] value. The pipeline then asks each capability whether it
//! is available instead of retrying a load per sentence.

use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;

use super::sentiment::{LexiconSentiment, SentimentAnalyzer};
use super::syntax::{LexiconSyntax, SyntaxAnalyzer};

/// An analyzer that is either loaded or known to be missing, with the reason.
pub enum Capability<T: ?Sized> {
    Available(Arc<T>),
    Unavailable(String),
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Available(analyzer) => Self::Available(Arc::clone(analyzer)),
            Self::Unavailable(reason) => Self::Unavailable(reason.clone()),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => write!(f, "Available"),
            Self::Unavailable(reason) => write!(f, "Unavailable({reason:?})"),
        }
    }
}

impl<T: ?Sized> Capability<T> {
    /// The analyzer, if it loaded.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Available(analyzer) => Some(analyzer.as_ref()),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Why the analyzer is missing, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable(reason) => Some(reason),
        }
    }
}

/// The analyzers handed to the title pipeline.
#[derive(Clone, Debug)]
pub struct Capabilities {
    pub sentiment: Capability<dyn SentimentAnalyzer>,
    pub syntax: Capability<dyn SyntaxAnalyzer>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Capabilities {
    /// Built-in lexicon analyzers for both capabilities.
    pub fn builtin() -> Self {
        Self {
            sentiment: Capability::Available(Arc::new(LexiconSentiment::new())),
            syntax: Capability::Available(Arc::new(LexiconSyntax::new())),
        }
    }

    /// Resolve both capabilities, loading lexicon files when paths are given.
    ///
    /// Never fails: a sentiment lexicon that does not load disables sentiment
    /// scoring, and a syntax lexicon that does not load marks syntax as
    /// unavailable, which makes every title extraction that needs it fail.
    pub fn resolve(sentiment_lexicon: Option<&str>, syntax_lexicon: Option<&str>) -> Self {
        let sentiment: Capability<dyn SentimentAnalyzer> = match sentiment_lexicon {
            None => Capability::Available(Arc::new(LexiconSentiment::new())),
            Some(path) => match LexiconSentiment::from_lexicon_file(Path::new(path)) {
                Ok(lexicon) => {
                    info!("Loaded sentiment lexicon {path} ({} words)", lexicon.len());
                    Capability::Available(Arc::new(lexicon))
                }
                Err(err) => {
                    warn!("Sentiment scoring disabled: {err:#}");
                    Capability::Unavailable(format!("{err:#}"))
                }
            },
        };

        let syntax: Capability<dyn SyntaxAnalyzer> = match syntax_lexicon {
            None => Capability::Available(Arc::new(LexiconSyntax::new())),
            Some(path) => match LexiconSyntax::from_lexicon_file(Path::new(path)) {
                Ok(lexicon) => {
                    info!("Loaded syntax lexicon {path}");
                    Capability::Available(Arc::new(lexicon))
                }
                Err(err) => {
                    error!("Syntax analysis unavailable, titles will fall back: {err:#}");
                    Capability::Unavailable(format!("{err:#}"))
                }
            },
        };

        Self { sentiment, syntax }
    }

    /// Same capabilities with sentiment scoring switched off.
    pub fn without_sentiment(mut self) -> Self {
        self.sentiment = Capability::Unavailable("disabled".to_string());
        self
    }

    /// Same capabilities with syntax analysis marked missing.
    pub fn without_syntax(mut self, reason: &str) -> Self {
        self.syntax = Capability::Unavailable(reason.to_string());
        self
    }
}
