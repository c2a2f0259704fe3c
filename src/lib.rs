//! # stopword-annotator
//!
//! A stopword annotation stage for NLP pipelines.
//!
//! [`StopwordFilter`] tags every token with whether its surface form, and
//! optionally its lemma, is a stopword. It declares what it produces and
//! requires through the [`Stage`] contract, so any scheduler that orders
//! stages by capability can host it.
//!
//! ## Quick start
//!
//! ```rust
//! use stopword_annotator::{StopwordConfig, StopwordFilter, Token};
//!
//! let filter = StopwordFilter::new(&StopwordConfig::new().with_ignore_case(true));
//! let mut tokens = vec![
//!     Token::new("The", 0, 3, 0, 0),
//!     Token::new("history", 4, 11, 0, 1),
//! ];
//! filter.annotate(&mut tokens).unwrap();
//!
//! assert!(tokens[0].is_stopword());
//! assert!(!tokens[1].is_stopword());
//! ```

// Logging goes through these so that builds without the `tracing` feature
// compile the calls away.

/// Enter a debug span for the rest of the enclosing block.
macro_rules! trace_span {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!($($arg)*).entered();
    };
}

macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}

pub mod errors;
pub mod nlp;
pub mod pipeline;
pub mod types;

pub use errors::StopwordError;
pub use nlp::annotator::{AnnotationSummary, StopwordFilter};
pub use nlp::stopwords::{StopwordSet, DEFAULT_STOPWORDS};
pub use pipeline::options::AnalysisOptions;
pub use pipeline::stage::{Capability, CapabilitySet, Stage, StageDescriptor, StagePlan};
pub use pipeline::validation::{ValidationEngine, ValidationReport};
pub use types::{StopwordConfig, StopwordMatch, StopwordTarget, Token};

#[cfg(test)]
mod tests {
    #[test]
    fn test_logging_macros_expand_with_and_without_tracing() {
        let tokens = 3;
        trace_span!("batch", tokens);
        log_debug!(tokens, "debug");
        log_warn!(tokens, "warn");
        assert_eq!(tokens, 3);
    }
}
