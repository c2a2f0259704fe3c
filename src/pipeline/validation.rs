//! Validation engine for stage plans.
//!
//! A [`ValidationEngine`] checks a [`StagePlan`](super::stage::StagePlan)
//! against each stage's declared prerequisites. Every rule runs on every
//! plan; the [`ValidationReport`] holds all of their findings.
//!
//! # Quick start
//!
//! ```rust
//! use stopword_annotator::nlp::annotator::StopwordFilter;
//! use stopword_annotator::pipeline::options::AnalysisOptions;
//! use stopword_annotator::pipeline::validation::ValidationEngine;
//! use stopword_annotator::types::StopwordConfig;
//!
//! let filter = StopwordFilter::new(&StopwordConfig::new().with_check_lemma(true));
//! let plan = AnalysisOptions::tokenization_only(true).plan().with_stage(&filter);
//!
//! let report = ValidationEngine::with_defaults().validate(&plan);
//! assert!(report.is_valid());
//! ```

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::PipelineSpecError;
use super::stage::{Capability, StagePlan};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Errors make a plan unusable; warnings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// One finding about a plan, pointing at the offending stage.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: PipelineSpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: PipelineSpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: PipelineSpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Findings of one [`ValidationEngine::validate`] call, in rule order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// A plan with warnings only can still be scheduled.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// No findings of any severity.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A check over a whole [`StagePlan`].
///
/// Rules hold no state, and an engine may be shared between threads.
pub trait ValidationRule: Send + Sync {
    /// Identifier used in logs, e.g. `"duplicate_stage"`.
    fn name(&self) -> &str;

    /// Findings for `plan`; empty when the rule is satisfied.
    fn validate(&self, plan: &StagePlan) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Ordered list of [`ValidationRule`]s.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Missing-prerequisite, prerequisite-order and duplicate-stage rules.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(MissingPrerequisiteRule));
        engine.add_rule(Box::new(PrerequisiteOrderRule));
        engine.add_rule(Box::new(DuplicateStageRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Runs every rule, even after one has reported an error.
    pub fn validate(&self, plan: &StagePlan) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            let found = rule.validate(plan);
            if !found.is_empty() {
                log_debug!(rule = rule.name(), count = found.len(), "validation findings");
            }
            report.diagnostics.extend(found);
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Index of the first stage producing each capability.
fn first_producers(plan: &StagePlan) -> FxHashMap<Capability, usize> {
    let mut producers = FxHashMap::default();
    for (idx, stage) in plan.stages.iter().enumerate() {
        producers.entry(stage.produces).or_insert(idx);
    }
    producers
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. every requirement is produced somewhere ─────────────────────────────

struct MissingPrerequisiteRule;

impl ValidationRule for MissingPrerequisiteRule {
    fn name(&self) -> &str {
        "missing_prerequisite"
    }

    fn validate(&self, plan: &StagePlan) -> Vec<ValidationDiagnostic> {
        let producers = first_producers(plan);
        let mut out = Vec::new();

        for (idx, stage) in plan.stages.iter().enumerate() {
            for req in &stage.requires {
                if producers.contains_key(req) {
                    continue;
                }
                out.push(ValidationDiagnostic::error(
                    PipelineSpecError::new(
                        ErrorCode::MissingStage,
                        format!("/stages/{idx}/requires/{req}"),
                        format!("{} requires {req}, which no stage produces", stage.name),
                    )
                    .with_hint(format!("Add the {req} stage before {}", stage.name)),
                ));
            }
        }

        out
    }
}

// ─── 2. requirements are produced before they are needed ────────────────────

struct PrerequisiteOrderRule;

impl ValidationRule for PrerequisiteOrderRule {
    fn name(&self) -> &str {
        "prerequisite_order"
    }

    fn validate(&self, plan: &StagePlan) -> Vec<ValidationDiagnostic> {
        let producers = first_producers(plan);
        let mut out = Vec::new();

        for (idx, stage) in plan.stages.iter().enumerate() {
            for req in &stage.requires {
                match producers.get(req) {
                    Some(&at) if at >= idx => {
                        out.push(ValidationDiagnostic::error(
                            PipelineSpecError::new(
                                ErrorCode::InvalidOrder,
                                format!("/stages/{idx}/requires/{req}"),
                                format!(
                                    "{} requires {req}, which is only produced later at stage {at}",
                                    stage.name
                                ),
                            )
                            .with_hint(format!("Move {} after {req}", stage.name)),
                        ));
                    }
                    _ => {}
                }
            }
        }

        out
    }
}

// ─── 3. each capability is produced once ────────────────────────────────────

struct DuplicateStageRule;

impl ValidationRule for DuplicateStageRule {
    fn name(&self) -> &str {
        "duplicate_stage"
    }

    fn validate(&self, plan: &StagePlan) -> Vec<ValidationDiagnostic> {
        let producers = first_producers(plan);

        plan.stages
            .iter()
            .enumerate()
            .filter(|(idx, stage)| producers.get(&stage.produces) != Some(idx))
            .map(|(idx, stage)| {
                ValidationDiagnostic::warning(
                    PipelineSpecError::new(
                        ErrorCode::DuplicateStage,
                        format!("/stages/{idx}"),
                        format!("{} is already produced by an earlier stage", stage.produces),
                    )
                    .with_hint("Remove the repeated stage"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::annotator::StopwordFilter;
    use crate::pipeline::options::AnalysisOptions;
    use crate::pipeline::stage::StageDescriptor;
    use crate::types::StopwordConfig;

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    fn filter(check_lemma: bool) -> StopwordFilter {
        StopwordFilter::new(&StopwordConfig::new().with_check_lemma(check_lemma))
    }

    fn plan(caps: &[Capability]) -> StagePlan {
        StagePlan::from_capabilities(caps).unwrap()
    }

    // ─── Valid plans ────────────────────────────────────────────────────

    #[test]
    fn test_empty_plan_is_valid() {
        let report = engine().validate(&StagePlan::new());
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_option_presets_are_valid() {
        for options in [
            AnalysisOptions::tokenization_only(false),
            AnalysisOptions::tokenization_only(true),
            AnalysisOptions::named_entity_recognition(true, true),
            AnalysisOptions::named_entities_with_coreference(true, None, true),
            AnalysisOptions::sentence_parser(false),
        ] {
            let report = engine().validate(&options.plan());
            assert!(report.is_empty(), "{}", options.annotators());
        }
    }

    #[test]
    fn test_stopword_after_tokenize_ssplit_is_valid() {
        let p = plan(&[Capability::Tokenize, Capability::SentenceSplit]).with_stage(&filter(false));
        assert!(engine().validate(&p).is_empty());
    }

    #[test]
    fn test_lemma_stopword_after_lemma_is_valid() {
        let p = AnalysisOptions::tokenization_only(true)
            .plan()
            .with_stage(&filter(true));
        assert!(engine().validate(&p).is_empty());
    }

    // ─── Rule: missing_prerequisite ─────────────────────────────────────

    #[test]
    fn test_lemma_stopword_without_lemma_fails() {
        let p = AnalysisOptions::tokenization_only(false)
            .plan()
            .with_stage(&filter(true));
        let report = engine().validate(&p);

        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::MissingStage);
        assert_eq!(errs[0].path, "/stages/3/requires/lemma");
    }

    #[test]
    fn test_stopword_alone_reports_each_missing_capability() {
        let p = StagePlan::new().with_stage(&filter(true));
        let report = engine().validate(&p);

        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 4);
        assert!(errs.iter().all(|e| e.code == ErrorCode::MissingStage));
    }

    #[test]
    fn test_stopword_cannot_skip_lemma_as_builtin() {
        // without a lemma stage, listing stopword as built in is refused
        let caps = AnalysisOptions::tokenization_only(false)
            .stages()
            .into_iter()
            .chain([Capability::Stopword])
            .collect::<Vec<_>>();
        let err = StagePlan::from_capabilities(&caps).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotBuiltin);
        assert_eq!(err.path, "/stages/3");

        // the configured filter still carries the lemma requirement
        let p = plan(&caps[..3]).with_stage(&filter(true));
        let report = engine().validate(&p);
        assert!(!report.is_valid());
        assert!(report
            .errors()
            .any(|e| e.path == "/stages/3/requires/lemma"));
    }

    // ─── Rule: prerequisite_order ───────────────────────────────────────

    #[test]
    fn test_stopword_before_ssplit_fails() {
        let mut p = plan(&[Capability::Tokenize]).with_stage(&filter(false));
        p.stages
            .push(StageDescriptor::builtin(Capability::SentenceSplit).unwrap());
        let report = engine().validate(&p);

        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::InvalidOrder);
        assert_eq!(errs[0].path, "/stages/1/requires/ssplit");
    }

    #[test]
    fn test_self_requirement_is_out_of_order() {
        let p = StagePlan {
            stages: vec![StageDescriptor {
                name: "loop".into(),
                produces: Capability::Tokenize,
                requires: vec![Capability::Tokenize],
            }],
        };
        let errs: Vec<_> = engine().validate(&p).errors().cloned().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::InvalidOrder);
    }

    // ─── Rule: duplicate_stage ──────────────────────────────────────────

    #[test]
    fn test_duplicate_stage_is_warning() {
        let p = plan(&[
            Capability::Tokenize,
            Capability::SentenceSplit,
            Capability::Tokenize,
        ]);
        let report = engine().validate(&p);

        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::DuplicateStage);
        assert_eq!(warns[0].path, "/stages/2");
    }

    // ─── Engine: custom rules ───────────────────────────────────────────

    #[test]
    fn test_custom_rule() {
        struct AlwaysWarnRule;
        impl ValidationRule for AlwaysWarnRule {
            fn name(&self) -> &str {
                "always_warn"
            }
            fn validate(&self, _plan: &StagePlan) -> Vec<ValidationDiagnostic> {
                vec![ValidationDiagnostic::warning(PipelineSpecError::new(
                    ErrorCode::ValidationFailed,
                    "",
                    "custom warning",
                ))]
            }
        }

        let mut eng = ValidationEngine::new();
        eng.add_rule(Box::new(AlwaysWarnRule));
        let report = eng.validate(&StagePlan::new());
        assert!(report.is_valid()); // warnings only
        assert_eq!(report.warnings().count(), 1);
    }

    // ─── Serialization ──────────────────────────────────────────────────

    #[test]
    fn test_report_serializes_to_json() {
        let p = StagePlan::new().with_stage(&filter(false));
        let report = engine().validate(&p);
        let json = serde_json::to_value(&report).unwrap();
        let diags = json["diagnostics"].as_array().unwrap();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0]["severity"], "error");
        assert_eq!(diags[0]["code"], "missing_stage");
        assert_eq!(diags[0]["path"], "/stages/0/requires/tokenize");
    }
}
