//! Stopword sets
//!
//! An immutable set of word forms with a case policy fixed at construction.
//! Sets come from the built-in English default list, a comma delimited custom
//! list, or a named language list from the `stop-words` crate.

use std::borrow::Cow;

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Built-in English stopwords: articles, conjunctions, prepositions and a few
/// common verbs.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Immutable set of stopwords
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    /// Stored forms, already lowercased when `ignore_case` is set
    stopwords: FxHashSet<String>,
    ignore_case: bool,
}

impl StopwordSet {
    /// The built-in English default list
    pub fn english_default(ignore_case: bool) -> Self {
        Self::from_terms(DEFAULT_STOPWORDS.iter().copied(), ignore_case)
    }

    /// Create an empty set (nothing is a stopword)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a comma delimited list.
    ///
    /// Terms are kept verbatim apart from the split; whitespace around a term
    /// is part of the term. Empty terms are dropped, so `""` and `",,"` give
    /// an empty set.
    pub fn from_list(list: &str, ignore_case: bool) -> Self {
        let set = Self::from_terms(list.split(','), ignore_case);
        if set.is_empty() {
            log_warn!(list, "custom stopword list has no terms");
        }
        set
    }

    /// Build a set from individual terms, skipping empty ones
    pub fn from_terms<I, S>(terms: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords: FxHashSet<String> = terms
            .into_iter()
            .filter(|t| !t.as_ref().is_empty())
            .map(|t| fold(t.as_ref(), ignore_case).into_owned())
            .collect();

        log_debug!(size = stopwords.len(), ignore_case, "built stopword set");

        Self {
            stopwords,
            ignore_case,
        }
    }

    /// Load a language list from the `stop-words` crate
    ///
    /// Supported languages: en, de, fr, es, it, pt, nl, ru, sv, no, da, fi,
    /// hu, tr, pl, ar. Unknown names fall back to English.
    pub fn for_language(language: &str, ignore_case: bool) -> Self {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            "ar" | "arabic" => LANGUAGE::Arabic,
            _ => {
                log_warn!(language, "unknown stopword language, using english");
                LANGUAGE::English
            }
        };

        let words: Vec<String> = get(lang).iter().map(|s| s.to_string()).collect();
        Self::from_terms(words, ignore_case)
    }

    /// Apply this set's case policy to `word`
    #[inline]
    pub fn normalize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        fold(word, self.ignore_case)
    }

    /// Check if a word is a stopword under this set's case policy
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.stopwords.contains(self.normalize(word).as_ref())
    }

    /// Whether comparisons are case-insensitive
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Get the number of stopwords in the set
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Iterate over the stored (normalized) forms, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stopwords.iter().map(String::as_str)
    }
}

fn fold(word: &str, ignore_case: bool) -> Cow<'_, str> {
    if ignore_case {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}
