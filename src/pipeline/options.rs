//! Analysis options for the external NLP engine.
//!
//! [`AnalysisOptions`] turns a handful of flags into the ordered list of
//! engine stages and the property map the engine is configured with.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "lemmatisation": true,
//!   "named_entity_recognition": true,
//!   "named_entity_recognition_regex": false,
//!   "sentence_parser": true,
//!   "coreference_analysis": true,
//!   "coref_max_sentence_dist": 125,
//!   "coref_post_processing": false
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::stage::{Capability, StageDescriptor, StagePlan};

/// Property key holding the comma separated stage list.
pub const ANNOTATORS_PROP: &str = "annotators";
/// Property key for tokenizer options.
pub const TOKENIZE_OPTIONS_PROP: &str = "tokenize.options";
/// Property key for the coreference sentence distance limit.
pub const COREF_MAXDIST_PROP: &str = "dcoref.maxdist";
/// Property key for coreference singleton post-processing.
pub const COREF_POSTPROCESSING_PROP: &str = "dcoref.postprocessing";

/// Tokenizer options: keep text invertible and leave slashes and brackets
/// unescaped.
pub const TOKENIZE_OPTIONS: &str = "invertible,ptb3Escaping=true,escapeForwardSlashAsterisk=false,normalizeParentheses=false,normalizeOtherBrackets=false";

/// Which engine stages to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Emit a lemma for each word.
    #[serde(default)]
    pub lemmatisation: bool,
    /// Named entity recognition.
    #[serde(default)]
    pub named_entity_recognition: bool,
    /// Regular expression based named entity recognition.
    #[serde(default)]
    pub named_entity_recognition_regex: bool,
    /// Parse trees for sentences.
    #[serde(default)]
    pub sentence_parser: bool,
    /// Coreference analysis. Implies the parser.
    #[serde(default)]
    pub coreference_analysis: bool,
    /// Max sentence distance for coreference; `None` is unlimited.
    #[serde(default)]
    pub coref_max_sentence_dist: Option<u32>,
    /// Trim singleton mentions after coreference.
    #[serde(default)]
    pub coref_post_processing: bool,
}

impl AnalysisOptions {
    /// Tokenization only, with optional lemmas.
    pub fn tokenization_only(lemmatisation: bool) -> Self {
        Self {
            lemmatisation,
            ..Self::default()
        }
    }

    /// Named entity recognition without coreference.
    pub fn named_entity_recognition(regex_ner: bool, sentence_parser: bool) -> Self {
        Self {
            lemmatisation: true,
            named_entity_recognition: true,
            named_entity_recognition_regex: regex_ner,
            sentence_parser,
            ..Self::default()
        }
    }

    /// Named entity recognition plus coreference analysis.
    pub fn named_entities_with_coreference(
        regex_ner: bool,
        coref_max_sentence_dist: Option<u32>,
        coref_post_processing: bool,
    ) -> Self {
        Self {
            lemmatisation: true,
            named_entity_recognition: true,
            named_entity_recognition_regex: regex_ner,
            sentence_parser: true,
            coreference_analysis: true,
            coref_max_sentence_dist,
            coref_post_processing,
        }
    }

    /// Sentence parsing, with optional lemmas.
    pub fn sentence_parser(lemmatisation: bool) -> Self {
        Self {
            lemmatisation,
            sentence_parser: true,
            ..Self::default()
        }
    }

    /// Ordered stage list. Order matters to the engine.
    pub fn stages(&self) -> Vec<Capability> {
        let mut stages = vec![
            Capability::Tokenize,
            Capability::SentenceSplit,
            Capability::Pos,
        ];

        if self.lemmatisation {
            stages.push(Capability::Lemma);
        }
        if self.named_entity_recognition {
            stages.push(Capability::Ner);
        }
        if self.named_entity_recognition_regex {
            stages.push(Capability::RegexNer);
        }
        if self.sentence_parser {
            stages.push(Capability::Parse);
        }
        if self.coreference_analysis {
            if !stages.contains(&Capability::Parse) {
                stages.push(Capability::Parse);
            }
            stages.push(Capability::Coref);
        }

        stages
    }

    /// `"tokenize, ssplit, pos, ..."`
    pub fn annotators(&self) -> String {
        self.stages()
            .iter()
            .map(Capability::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Engine properties for these options.
    pub fn properties(&self) -> BTreeMap<String, String> {
        let mut props = BTreeMap::new();
        props.insert(ANNOTATORS_PROP.to_string(), self.annotators());
        props.insert(
            TOKENIZE_OPTIONS_PROP.to_string(),
            TOKENIZE_OPTIONS.to_string(),
        );

        if self.coreference_analysis {
            let max_dist = self
                .coref_max_sentence_dist
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-1".to_string());
            props.insert(COREF_MAXDIST_PROP.to_string(), max_dist);
            props.insert(
                COREF_POSTPROCESSING_PROP.to_string(),
                self.coref_post_processing.to_string(),
            );
        }

        props
    }

    /// Stage plan of the engine's built-in stages, ready for more stages to
    /// be appended and for validation.
    pub fn plan(&self) -> StagePlan {
        // stages() only lists built-in stages
        StagePlan {
            stages: self
                .stages()
                .into_iter()
                .filter_map(StageDescriptor::builtin)
                .collect(),
        }
    }
}
