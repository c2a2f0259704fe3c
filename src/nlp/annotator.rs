//! Stopword annotation stage
//!
//! [`StopwordFilter`] marks each token with a [`StopwordMatch`]: whether its
//! surface form, and optionally its lemma, is in the configured
//! [`StopwordSet`].

use rayon::prelude::*;

use crate::errors::{Result, StopwordError};
use crate::nlp::stopwords::StopwordSet;
use crate::pipeline::stage::{Capability, CapabilitySet, Stage};
use crate::types::{StopwordConfig, StopwordMatch, StopwordTarget};

/// Stage name used in annotator lists
pub const ANNOTATOR_NAME: &str = "stopword";

/// Per-batch counts returned by [`StopwordFilter::annotate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub tokens: usize,
    pub word_matches: usize,
    pub lemma_matches: usize,
}

impl AnnotationSummary {
    fn record(&mut self, m: StopwordMatch) {
        self.tokens += 1;
        self.word_matches += m.word as usize;
        self.lemma_matches += m.lemma as usize;
    }

    fn merge(mut self, other: Self) -> Self {
        self.tokens += other.tokens;
        self.word_matches += other.word_matches;
        self.lemma_matches += other.lemma_matches;
        self
    }
}

/// Annotates tokens with stopword membership.
///
/// Immutable once built, so one instance can annotate any number of batches
/// concurrently.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: StopwordSet,
    check_lemma: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new(&StopwordConfig::default())
    }
}

impl StopwordFilter {
    /// Build a filter from its configuration. Never fails.
    ///
    /// A custom list wins over a language, and a language wins over the
    /// built-in default list.
    pub fn new(config: &StopwordConfig) -> Self {
        let stopwords = match (&config.stopword_list, &config.language) {
            (Some(list), _) => StopwordSet::from_list(list, config.ignore_case),
            (None, Some(language)) => StopwordSet::for_language(language, config.ignore_case),
            (None, None) => StopwordSet::english_default(config.ignore_case),
        };

        log_debug!(
            stopwords = stopwords.len(),
            ignore_case = config.ignore_case,
            check_lemma = config.check_lemma,
            "configured stopword filter"
        );

        Self {
            stopwords,
            check_lemma: config.check_lemma,
        }
    }

    /// Build a filter around an existing set
    pub fn with_set(stopwords: StopwordSet, check_lemma: bool) -> Self {
        Self {
            stopwords,
            check_lemma,
        }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn check_lemma(&self) -> bool {
        self.check_lemma
    }

    /// Compute the result for a single token
    ///
    /// With lemma checking on, a missing lemma is treated as no match; use
    /// [`annotate`](Self::annotate) to have it reported instead.
    pub fn classify<T: StopwordTarget + ?Sized>(&self, token: &T) -> StopwordMatch {
        if self.stopwords.is_empty() {
            return StopwordMatch::NONE;
        }

        let word = self.stopwords.contains(token.word());
        let lemma = self.check_lemma
            && token
                .lemma()
                .map(|l| self.stopwords.contains(l))
                .unwrap_or(false);

        StopwordMatch { word, lemma }
    }

    /// Annotate a batch of tokens in order.
    ///
    /// Every token gets a fresh [`StopwordMatch`], replacing any earlier one.
    /// With lemma checking on, the batch is rejected before any token is
    /// touched if one of them has no lemma.
    pub fn annotate<T: StopwordTarget>(&self, tokens: &mut [T]) -> Result<AnnotationSummary> {
        trace_span!("stopword_annotate", tokens = tokens.len());
        self.check_preconditions(&*tokens)?;

        let mut summary = AnnotationSummary::default();
        for token in tokens.iter_mut() {
            let m = self.classify(&*token);
            token.set_stopword(m);
            summary.record(m);
        }

        log_debug!(?summary, "annotated batch");
        Ok(summary)
    }

    /// Parallel version of [`annotate`](Self::annotate) with identical
    /// results.
    pub fn annotate_par<T: StopwordTarget + Send>(
        &self,
        tokens: &mut [T],
    ) -> Result<AnnotationSummary> {
        trace_span!("stopword_annotate", tokens = tokens.len(), parallel = true);
        self.check_preconditions(&*tokens)?;

        let summary = tokens
            .par_iter_mut()
            .map(|token| {
                let m = self.classify(&*token);
                token.set_stopword(m);
                let mut s = AnnotationSummary::default();
                s.record(m);
                s
            })
            .reduce(AnnotationSummary::default, AnnotationSummary::merge);

        log_debug!(?summary, "annotated batch");
        Ok(summary)
    }

    fn check_preconditions<T: StopwordTarget>(&self, tokens: &[T]) -> Result<()> {
        if !self.check_lemma || self.stopwords.is_empty() {
            return Ok(());
        }
        match tokens.iter().position(|t| t.lemma().is_none()) {
            Some(position) => Err(StopwordError::MissingLemma { position }),
            None => Ok(()),
        }
    }
}

impl Stage for StopwordFilter {
    fn name(&self) -> &str {
        ANNOTATOR_NAME
    }

    fn produces(&self) -> Capability {
        Capability::Stopword
    }

    fn requires(&self) -> CapabilitySet {
        let mut required: CapabilitySet =
            [Capability::Tokenize, Capability::SentenceSplit].into_iter().collect();
        if self.check_lemma {
            required.insert(Capability::Pos);
            required.insert(Capability::Lemma);
        }
        required
    }
}
