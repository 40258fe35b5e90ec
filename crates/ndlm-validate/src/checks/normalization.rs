use ndlm_core::RngHandle;

use crate::checker::CheckerId;
use crate::density::normal_pdf;
use crate::diagnostics::{Diagnostics, NormalizationCase, NormalizationDiagnostics};
use crate::linalg::max_error;
use crate::quadrature::{integrate_real_line, QuadratureOpts};
use crate::result::ValidationResult;

/// Maximum tolerated `|integral - 1|`.
pub const TOLERANCE: f64 = 1e-9;

/// Integrates `n_cases` random Gaussian densities with default quadrature.
pub fn run(rng: &mut RngHandle, n_cases: usize) -> ValidationResult {
    run_with(rng, n_cases, &QuadratureOpts::default())
}

/// Integrates `n_cases` random Gaussian densities over the real line.
pub fn run_with(rng: &mut RngHandle, n_cases: usize, quad: &QuadratureOpts) -> ValidationResult {
    let mut max_abs_error = 0.0;
    let mut cases = Vec::with_capacity(n_cases);
    let mut worst_case: Option<NormalizationCase> = None;

    for _ in 0..n_cases {
        let mean = rng.normal(0.0, 2.0);
        let variance = rng.log_normal(-0.2, 0.7);
        let outcome = integrate_real_line(|y| normal_pdf(y, mean, variance), quad);
        let abs_error = (outcome.value - 1.0).abs();
        let case = NormalizationCase {
            mean,
            variance,
            integral: outcome.value,
            abs_error,
            quadrature_error: outcome.error_estimate,
            converged: outcome.converged,
        };
        if worst_case.is_none() || abs_error > max_abs_error || abs_error.is_nan() {
            worst_case = Some(case.clone());
        }
        max_abs_error = max_error(max_abs_error, abs_error);
        cases.push(case);
    }

    let passed = max_abs_error < TOLERANCE;
    ValidationResult::from_verdict(
        CheckerId::LikelihoodNormalization,
        passed,
        Diagnostics::Normalization(NormalizationDiagnostics {
            max_abs_error,
            tolerance: TOLERANCE,
            cases,
            worst_case,
        }),
    )
}
