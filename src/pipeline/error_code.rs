//! Stable machine-readable codes for stage plan diagnostics.

use serde::{Deserialize, Serialize};

/// Diagnostic code carried by every [`PipelineSpecError`](super::errors::PipelineSpecError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required capability is produced by no stage in the plan.
    MissingStage,
    /// A required capability is only produced by a later stage.
    InvalidOrder,
    /// Two stages produce the same capability.
    DuplicateStage,
    /// A configured stage was listed as if the engine provided it.
    NotBuiltin,
    /// Generic failure raised by custom rules.
    ValidationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingStage => "missing_stage",
            Self::InvalidOrder => "invalid_order",
            Self::DuplicateStage => "duplicate_stage",
            Self::NotBuiltin => "not_builtin",
            Self::ValidationFailed => "validation_failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
