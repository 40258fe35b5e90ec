use ndlm_core::RngHandle;
use tracing::debug;

use crate::checker::CheckerId;
use crate::checks::offset_spread;
use crate::diagnostics::{Diagnostics, InverseGammaDiagnostics, InverseGammaTrial};
use crate::linalg::max_error;
use crate::result::ValidationResult;

/// Maximum tolerated spread of the log-kernel offset.
pub const TOLERANCE: f64 = 1e-10;

/// Number of log-spaced variances per trial.
pub const GRID_POINTS: usize = 60;

/// Log inverse-gamma kernel `-(a + 1) ln s2 - b / s2`.
pub fn log_ig_kernel(s2: f64, shape: f64, scale: f64) -> f64 {
    -(shape + 1.0) * s2.ln() - scale / s2
}

/// Log Gaussian likelihood kernel of `n` residuals with sum of squares `sse`.
pub fn log_gaussian_variance_likelihood(s2: f64, n: usize, sse: f64) -> f64 {
    -(n as f64 / 2.0) * s2.ln() - 0.5 * sse / s2
}

/// Posterior `(shape, scale)` after `n` residuals with sum of squares `sse`.
pub fn posterior_params(a0: f64, b0: f64, n: usize, sse: f64) -> (f64, f64) {
    (a0 + n as f64 / 2.0, b0 + 0.5 * sse)
}

/// `exp(linspace(-3, 3, GRID_POINTS))`.
pub fn variance_grid() -> Vec<f64> {
    let step = 6.0 / (GRID_POINTS - 1) as f64;
    (0..GRID_POINTS)
        .map(|idx| (-3.0 + idx as f64 * step).exp())
        .collect()
}

/// Checks the IG conjugate update over `n_trials` random data sets.
pub fn run(rng: &mut RngHandle, n_trials: usize) -> ValidationResult {
    let grid = variance_grid();
    let mut max_std = 0.0;
    let mut worst_case: Option<InverseGammaTrial> = None;

    for _ in 0..n_trials {
        let n = rng.integer(5, 40);
        let sse: f64 = rng.normal_vec(n, 1.7).iter().map(|e| e * e).sum();
        let a0 = rng.uniform(1.5, 4.0);
        let b0 = rng.uniform(0.5, 3.0);
        let (a1, b1) = posterior_params(a0, b0, n, sse);

        let diffs: Vec<f64> = grid
            .iter()
            .map(|&s2| {
                let prior_times_likelihood =
                    log_gaussian_variance_likelihood(s2, n, sse) + log_ig_kernel(s2, a0, b0);
                prior_times_likelihood - log_ig_kernel(s2, a1, b1)
            })
            .collect();
        let std_diff = offset_spread(&diffs);

        if worst_case.is_none() || std_diff > max_std || std_diff.is_nan() {
            debug!(n, sse, std_diff, "new worst inverse-gamma trial");
            worst_case = Some(InverseGammaTrial {
                n,
                sse,
                a0,
                b0,
                a1,
                b1,
                std_diff,
            });
        }
        max_std = max_error(max_std, std_diff);
    }

    let passed = max_std < TOLERANCE;
    ValidationResult::from_verdict(
        CheckerId::InverseGammaConjugacy,
        passed,
        Diagnostics::InverseGamma(InverseGammaDiagnostics {
            max_std_of_kernel_difference: max_std,
            tolerance: TOLERANCE,
            grid_points: GRID_POINTS,
            worst_case,
        }),
    )
}
