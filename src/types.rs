//! Core data types
//!
//! Tokens, the per-token stopword result, and the stopword stage
//! configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::StopwordError;

/// Property key for the comma delimited list of custom stopwords
pub const STOPWORDS_LIST: &str = "stopword-list";

/// Property key for case-insensitive stopword matching
pub const IGNORE_STOPWORD_CASE: &str = "ignore-stopword-case";

/// Property key for also checking the token lemma
pub const CHECK_LEMMA: &str = "check-lemma";

/// Property key for a named `stop-words` language list
pub const STOPWORD_LANGUAGE: &str = "stopword-language";

/// Stopword result attached to a token: `(word, lemma)`.
///
/// `lemma` is always `false` when the filter was not configured to check
/// lemmas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StopwordMatch {
    /// Surface form is a stopword
    pub word: bool,
    /// Lemma is a stopword
    pub lemma: bool,
}

impl StopwordMatch {
    pub const NONE: StopwordMatch = StopwordMatch {
        word: false,
        lemma: false,
    };

    pub fn new(word: bool, lemma: bool) -> Self {
        Self { word, lemma }
    }

    /// True if either the surface form or the lemma matched
    pub fn any(&self) -> bool {
        self.word || self.lemma
    }
}

impl From<StopwordMatch> for (bool, bool) {
    fn from(m: StopwordMatch) -> Self {
        (m.word, m.lemma)
    }
}

/// A token record that can receive a stopword annotation.
///
/// Pipelines with their own token type implement this to host
/// [`StopwordFilter`](crate::nlp::annotator::StopwordFilter) without
/// converting into [`Token`].
pub trait StopwordTarget {
    /// Surface form of the token
    fn word(&self) -> &str;

    /// Lemma, if upstream lemmatization ran
    fn lemma(&self) -> Option<&str>;

    /// Attach the stopword result, replacing any previous one
    fn set_stopword(&mut self, result: StopwordMatch);
}

/// A token with its position and annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The original text of the token
    pub text: String,
    /// The lemmatized form, once computed
    #[serde(default)]
    pub lemma: Option<String>,
    /// Character offset of the start of the token
    pub start: usize,
    /// Character offset of the end of the token
    pub end: usize,
    /// Sentence index (0-based)
    pub sentence_idx: usize,
    /// Token index within the document (0-based)
    pub token_idx: usize,
    /// Stopword annotation, set by the stopword stage
    #[serde(default)]
    pub stopword: Option<StopwordMatch>,
}

impl Token {
    /// Create a new token without a lemma
    pub fn new(
        text: impl Into<String>,
        start: usize,
        end: usize,
        sentence_idx: usize,
        token_idx: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: None,
            start,
            end,
            sentence_idx,
            token_idx,
            stopword: None,
        }
    }

    /// Set the lemma
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Whether the stopword stage flagged the surface form
    pub fn is_stopword(&self) -> bool {
        self.stopword.map(|m| m.word).unwrap_or(false)
    }
}

impl StopwordTarget for Token {
    fn word(&self) -> &str {
        &self.text
    }

    fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    fn set_stopword(&mut self, result: StopwordMatch) {
        self.stopword = Some(result);
    }
}

/// Configuration for the stopword stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwordConfig {
    /// Comma delimited custom stopwords; replaces the default list
    #[serde(default)]
    pub stopword_list: Option<String>,
    /// Named `stop-words` language list, used when no custom list is given
    #[serde(default)]
    pub language: Option<String>,
    /// Lowercase both stopwords and tokens before comparing
    #[serde(default)]
    pub ignore_case: bool,
    /// Also test the token lemma
    #[serde(default)]
    pub check_lemma: bool,
}

impl StopwordConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stopword_list(mut self, list: impl Into<String>) -> Self {
        self.stopword_list = Some(list.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_check_lemma(mut self, check_lemma: bool) -> Self {
        self.check_lemma = check_lemma;
        self
    }

    /// Parse a JSON configuration object
    pub fn from_json(json: &str) -> Result<Self, StopwordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build from string properties using the `stopword-list`,
    /// `ignore-stopword-case`, `check-lemma` and `stopword-language` keys.
    ///
    /// Flags are on only for a case-insensitive `"true"`; missing keys and
    /// any other value read as off.
    pub fn from_properties(props: &HashMap<String, String>) -> Self {
        let flag = |key: &str| {
            props
                .get(key)
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        Self {
            stopword_list: props.get(STOPWORDS_LIST).cloned(),
            language: props.get(STOPWORD_LANGUAGE).cloned(),
            ignore_case: flag(IGNORE_STOPWORD_CASE),
            check_lemma: flag(CHECK_LEMMA),
        }
    }
}
