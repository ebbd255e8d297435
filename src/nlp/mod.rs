//! Natural Language Processing components
//!
//! Tokenization, stopword filtering, vocabulary term matching and the two
//! optional analyzers (sentiment, syntax) the title pipeline relies on.

pub mod capability;
pub mod sentiment;
pub mod stopwords;
pub mod syntax;
pub mod terms;
pub mod tokenizer;

pub use capability::{Capabilities, Capability};
pub use sentiment::{LexiconSentiment, SentimentAnalyzer};
pub use stopwords::StopwordFilter;
pub use syntax::{LexiconSyntax, SyntaxAnalyzer, SyntaxFeatures, WordClass};
pub use terms::{TermBoundary, TermMatcher};
