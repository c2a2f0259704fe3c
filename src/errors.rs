//! Error types for the stopword stage

use thiserror::Error;

/// Errors raised by stopword configuration and annotation.
#[derive(Debug, Error)]
pub enum StopwordError {
    /// Lemma checking is enabled but a token reached the filter without a
    /// lemma, so the lemmatization stage did not run before this one.
    /// `position` is the offending token's index in the annotated slice,
    /// which may differ from its [`Token::token_idx`](crate::types::Token).
    #[error("precondition failed: token at position {position} has no lemma but check-lemma is enabled")]
    MissingLemma { position: usize },

    #[error("invalid stopword config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StopwordError>;
