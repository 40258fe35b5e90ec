use ndlm_core::{stable_hash_string, NdlmError, RngHandle, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use crate::checker::CheckerId;
use crate::checks::{
    conjugacy_ig, conjugacy_iw, gradient, joint_marginal, kalman, normalization, replicate,
};
use crate::config::SuiteConfig;
use crate::result::ValidationResult;

/// Schema version of [`SuiteReport`].
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Pass/fail totals over a suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    /// Number of checkers run.
    pub total: usize,
    /// Number of passing checkers.
    pub passed: usize,
    /// Number of failing checkers.
    pub failed: usize,
    /// Whether every checker passed.
    pub all_passed: bool,
}

impl SuiteSummary {
    /// Counts verdicts in `results`.
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        Self {
            total,
            passed,
            failed: total - passed,
            all_passed: passed == total,
        }
    }
}

/// Ordered results of a suite run with their summary and content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Report schema version.
    pub schema_version: SchemaVersion,
    /// Master seed of the trial stream.
    pub seed: u64,
    /// Pass/fail totals.
    pub summary: SuiteSummary,
    /// One result per checker, in suite order.
    pub results: Vec<ValidationResult>,
    /// Stable hash of `results`; equal seeds give equal hashes.
    pub results_hash: String,
}

fn run_checker(id: CheckerId, rng: &mut RngHandle, config: &SuiteConfig) -> ValidationResult {
    let trials = &config.trials;
    match id {
        CheckerId::LikelihoodNormalization => {
            normalization::run_with(rng, trials.normalization, &config.quadrature)
        }
        CheckerId::JointMarginal => {
            joint_marginal::run_with(rng, trials.joint_marginal, &config.quadrature)
        }
        CheckerId::InverseGammaConjugacy => conjugacy_ig::run(rng, trials.inverse_gamma),
        CheckerId::InverseWishartConjugacy => {
            conjugacy_iw::run(rng, trials.inverse_wishart, trials.iw_evaluation_samples)
        }
        CheckerId::GradientHessian => gradient::run(rng, trials.gradient),
        CheckerId::KalmanEquivalence => kalman::run(rng, trials.kalman, config.kalman_horizon),
        CheckerId::ReplicateAggregation => replicate::run(rng, trials.replicate),
    }
}

/// Runs every checker in [`CheckerId::ALL`] order against one shared stream.
///
/// Always returns one result per checker; failures are recorded, never raised.
pub fn run_checkers(rng: &mut RngHandle, config: &SuiteConfig) -> Vec<ValidationResult> {
    CheckerId::ALL
        .iter()
        .map(|&id| {
            let span = info_span!("checker", checker = id.name());
            let _guard = span.enter();
            let result = run_checker(id, rng, config);
            let error = result.diagnostics().headline_error();
            if result.passed() {
                info!(error, "passed");
            } else {
                warn!(error, details = result.details(), "failed");
            }
            result
        })
        .collect()
}

/// Runs the suite with default trial counts for `seed`.
pub fn run_validators(seed: u64) -> Vec<ValidationResult> {
    let config = SuiteConfig::with_seed(seed);
    let mut rng = RngHandle::from_seed(seed);
    run_checkers(&mut rng, &config)
}

/// Validates `config`, runs the suite, and assembles the report.
pub fn run_suite(config: &SuiteConfig) -> Result<SuiteReport, NdlmError> {
    config.validate()?;
    let mut rng = RngHandle::from_seed(config.seed);
    let results = run_checkers(&mut rng, config);
    let summary = SuiteSummary::from_results(&results);
    info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "suite complete"
    );
    let results_hash = stable_hash_string(&results)?;
    Ok(SuiteReport {
        schema_version: REPORT_SCHEMA,
        seed: config.seed,
        summary,
        results,
        results_hash,
    })
}
