//! Capability-based stage contract.
//!
//! A stage declares the one [`Capability`] it produces and the set it
//! requires. Any scheduler that orders stages by these sets can host a stage;
//! nothing here depends on a particular pipeline framework.
//!
//! A [`StagePlan`] is an ordered list of [`StageDescriptor`]s, which is what
//! the [`super::validation::ValidationEngine`] checks.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error_code::ErrorCode;
use super::errors::PipelineSpecError;

/// A unit of pipeline output that later stages can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Tokens are available.
    Tokenize,
    /// Sentence boundaries are available.
    #[serde(rename = "ssplit")]
    SentenceSplit,
    /// Part-of-speech tags are available.
    Pos,
    /// Lemmas are available.
    Lemma,
    /// Named entities are available.
    Ner,
    /// Regex-based named entities are available.
    #[serde(rename = "regexner")]
    RegexNer,
    /// Constituency/dependency parses are available.
    Parse,
    /// Coreference chains are available.
    #[serde(rename = "dcoref")]
    Coref,
    /// Stopword annotation is present on each token.
    Stopword,
}

impl Capability {
    /// Name used in annotator lists and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tokenize => "tokenize",
            Self::SentenceSplit => "ssplit",
            Self::Pos => "pos",
            Self::Lemma => "lemma",
            Self::Ner => "ner",
            Self::RegexNer => "regexner",
            Self::Parse => "parse",
            Self::Coref => "dcoref",
            Self::Stopword => "stopword",
        }
    }

    /// Prerequisites of the engine's built-in stages.
    ///
    /// `None` for the stopword stage: it is not built in and its
    /// requirements depend on its configuration, so its descriptor only comes
    /// from [`crate::nlp::annotator::StopwordFilter`].
    pub fn builtin_requirements(&self) -> Option<&'static [Capability]> {
        use Capability::*;
        let required: &'static [Capability] = match self {
            Tokenize => &[],
            SentenceSplit => &[Tokenize],
            Pos => &[Tokenize, SentenceSplit],
            Lemma => &[Tokenize, SentenceSplit, Pos],
            Ner => &[Tokenize, SentenceSplit, Pos, Lemma],
            RegexNer => &[Tokenize, SentenceSplit, Pos],
            Parse => &[Tokenize, SentenceSplit],
            Coref => &[Tokenize, SentenceSplit, Pos, Lemma, Ner, Parse],
            Stopword => return None,
        };
        Some(required)
    }

    /// Whether the engine provides this stage itself.
    pub fn is_builtin(&self) -> bool {
        self.builtin_requirements().is_some()
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Capability {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "tokenize" => Ok(Self::Tokenize),
            "ssplit" => Ok(Self::SentenceSplit),
            "pos" => Ok(Self::Pos),
            "lemma" => Ok(Self::Lemma),
            "ner" => Ok(Self::Ner),
            "regexner" => Ok(Self::RegexNer),
            "parse" => Ok(Self::Parse),
            "dcoref" => Ok(Self::Coref),
            "stopword" => Ok(Self::Stopword),
            other => Err(format!("unknown capability \"{other}\"")),
        }
    }
}

pub type CapabilitySet = FxHashSet<Capability>;

/// A pipeline stage as seen by a scheduler.
///
/// # Contract
///
/// - `produces` and `requires` are pure functions of the stage's
///   configuration; they never look at the data being processed.
/// - A scheduler must run every stage producing a required capability before
///   this one.
pub trait Stage {
    /// Short identifier, e.g. `"stopword"`.
    fn name(&self) -> &str;

    /// The single capability this stage adds.
    fn produces(&self) -> Capability;

    /// Capabilities that must be present before this stage runs.
    fn requires(&self) -> CapabilitySet;

    /// Owned snapshot of the contract.
    fn descriptor(&self) -> StageDescriptor {
        let mut requires: Vec<Capability> = self.requires().into_iter().collect();
        requires.sort();
        StageDescriptor {
            name: self.name().to_string(),
            produces: self.produces(),
            requires,
        }
    }
}

/// Serializable form of a [`Stage`] contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDescriptor {
    pub name: String,
    pub produces: Capability,
    /// Sorted, without duplicates.
    #[serde(default)]
    pub requires: Vec<Capability>,
}

impl StageDescriptor {
    /// Descriptor for one of the engine's built-in stages, or `None` for a
    /// stage that must describe itself through [`Stage::descriptor`].
    pub fn builtin(capability: Capability) -> Option<Self> {
        let requires = capability.builtin_requirements()?.to_vec();
        Some(Self {
            name: capability.as_str().to_string(),
            produces: capability,
            requires,
        })
    }

    pub fn requires_set(&self) -> CapabilitySet {
        self.requires.iter().copied().collect()
    }
}

/// Ordered list of stages, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePlan {
    pub stages: Vec<StageDescriptor>,
}

impl StagePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan made of built-in stages, in the given order.
    ///
    /// Fails on the first capability that is not built in; append such
    /// stages with [`push_stage`](Self::push_stage) instead.
    pub fn from_capabilities(capabilities: &[Capability]) -> Result<Self, PipelineSpecError> {
        let stages = capabilities
            .iter()
            .enumerate()
            .map(|(idx, &cap)| {
                StageDescriptor::builtin(cap).ok_or_else(|| {
                    PipelineSpecError::new(
                        ErrorCode::NotBuiltin,
                        format!("/stages/{idx}"),
                        format!("{cap} is not a built-in stage"),
                    )
                    .with_hint(format!("Append the configured {cap} stage with push_stage"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stages })
    }

    /// Append a stage's contract.
    pub fn push_stage(&mut self, stage: &impl Stage) {
        self.stages.push(stage.descriptor());
    }

    /// Append a stage and return the plan, for chaining.
    pub fn with_stage(mut self, stage: &impl Stage) -> Self {
        self.push_stage(stage);
        self
    }

    /// Capabilities produced by the plan, in order.
    pub fn produced(&self) -> impl Iterator<Item = Capability> + '_ {
        self.stages.iter().map(|s| s.produces)
    }

    /// `annotators`-style listing: `"tokenize, ssplit, pos"`.
    pub fn annotators(&self) -> String {
        self.stages
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
