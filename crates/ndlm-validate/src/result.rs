use ndlm_core::NdlmError;
use serde::{Deserialize, Serialize};

use crate::checker::CheckerId;
use crate::diagnostics::Diagnostics;

/// Verdict of a single checker invocation.
///
/// Built once at the end of a checker run and never mutated afterwards; the
/// fields are only reachable through accessors. `passed` is derived from the
/// error metrics held in `diagnostics`, which always include the worst trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    name: String,
    passed: bool,
    equation_refs: String,
    details: String,
    diagnostics: Diagnostics,
}

impl ValidationResult {
    /// Records a completed comparison.
    pub fn from_verdict(checker: CheckerId, passed: bool, diagnostics: Diagnostics) -> Self {
        let details = if passed {
            checker.pass_details()
        } else {
            checker.fail_details()
        };
        Self {
            name: checker.name().to_string(),
            passed,
            equation_refs: checker.equation_refs().to_string(),
            details: details.to_string(),
            diagnostics,
        }
    }

    /// Records a comparison that could not be completed as a failure.
    pub fn from_error(checker: CheckerId, err: &NdlmError, diagnostics: Diagnostics) -> Self {
        Self {
            name: checker.name().to_string(),
            passed: false,
            equation_refs: checker.equation_refs().to_string(),
            details: format!("{} {err}", checker.fail_details()),
            diagnostics,
        }
    }

    /// Stable checker identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether every trial stayed within the checker's tolerance.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Opaque citation string.
    pub fn equation_refs(&self) -> &str {
        &self.equation_refs
    }

    /// Human readable summary.
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Typed diagnostics sufficient to reconstruct the verdict.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
