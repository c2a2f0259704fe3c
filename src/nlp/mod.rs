//! Natural Language Processing components
//!
//! This module provides stopword sets and the stopword annotation stage.

pub mod annotator;
pub mod stopwords;
