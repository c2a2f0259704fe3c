//! Structured error for stage plan validation.

use serde::Serialize;
use thiserror::Error;

use super::error_code::ErrorCode;

/// A single problem found in a [`StagePlan`](super::stage::StagePlan).
///
/// `path` is a JSON pointer into the plan (e.g. `/stages/3/requires/lemma`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("[{code}] {path}: {message}")]
pub struct PipelineSpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineSpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PipelineSpecError::new(
            ErrorCode::MissingStage,
            "/stages/2/requires/lemma",
            "stopword requires lemma",
        );
        assert_eq!(
            err.to_string(),
            "[missing_stage] /stages/2/requires/lemma: stopword requires lemma"
        );
    }

    #[test]
    fn test_hint_omitted_when_absent() {
        let err = PipelineSpecError::new(ErrorCode::DuplicateStage, "/stages/1", "dup");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("hint").is_none());

        let json = serde_json::to_value(err.with_hint("remove it")).unwrap();
        assert_eq!(json["hint"], "remove it");
    }
}
