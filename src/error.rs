//! Typed errors of the title extraction pipeline.
//!
//! Batch stages work with `anyhow::Result`; the pipeline keeps its own error so
//! callers can tell a missing syntax analyzer apart from a broken vocabulary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The syntax analyzer could not be loaded, so word windows cannot be scored.
    #[error("syntax analyzer unavailable: {0}")]
    SyntaxUnavailable(String),

    /// A vocabulary entry produced a pattern the regex engine rejected.
    #[error("invalid vocabulary pattern: {0}")]
    Pattern(#[from] regex::Error),
}
