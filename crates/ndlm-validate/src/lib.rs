#![deny(missing_docs)]
#![doc = "Randomized-trial checkers that verify closed-form NDLM derivations against independent numerical ground truth."]

/// Stable checker identifiers, citations, and verdict messages.
pub mod checker;
/// Individual identity checkers.
pub mod checks;
/// Suite configuration and trial counts.
pub mod config;
/// Closed-form Gaussian densities shared by the quadrature checks.
pub mod density;
/// Typed per-checker diagnostics.
pub mod diagnostics;
/// Dense linear algebra and sampling helpers.
pub mod linalg;
/// Adaptive Gauss-Kronrod quadrature over the real line.
pub mod quadrature;
/// Immutable checker verdicts.
pub mod result;
/// Fixed-order suite runner and summary.
pub mod suite;

pub use checker::CheckerId;
pub use config::{SuiteConfig, TrialCounts};
pub use diagnostics::Diagnostics;
pub use quadrature::{integrate_real_line, QuadratureOpts, QuadratureOutcome};
pub use result::ValidationResult;
pub use suite::{run_checkers, run_suite, run_validators, SuiteReport, SuiteSummary};
