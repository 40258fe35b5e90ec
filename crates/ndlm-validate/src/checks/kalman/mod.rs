//! Kalman filter plus RTS smoother checked against brute-force conditioning.
//!
//! [`filter`] is the O(T) production recursion. [`brute`] builds the joint
//! Gaussian over the whole trajectory and conditions once, at O((T d)^3)
//! cost. The two modules are written independently so that agreement carries
//! evidential weight.

pub mod brute;
pub mod filter;
pub mod system;

use ndlm_core::{NdlmError, RngHandle};
use tracing::debug;

use crate::checker::CheckerId;
use crate::diagnostics::{Diagnostics, KalmanDiagnostics, StepError};
use crate::linalg::{max_abs_diff, max_abs_diff_vec, max_error};
use crate::result::ValidationResult;

pub use system::{ObservationChannel, PosteriorMoments, StateSpaceSystem};

/// Maximum tolerated mean and covariance difference at any time step.
pub const TOLERANCE: f64 = 1e-8;

/// Per-step discrepancies between two posterior sequences.
pub fn compare_moments(a: &PosteriorMoments, b: &PosteriorMoments) -> Vec<StepError> {
    let steps = a.means.len().max(b.means.len());
    (0..steps)
        .map(|t| {
            let mean_error = match (a.means.get(t), b.means.get(t)) {
                (Some(x), Some(y)) => max_abs_diff_vec(x, y),
                _ => f64::INFINITY,
            };
            let cov_error = match (a.covariances.get(t), b.covariances.get(t)) {
                (Some(x), Some(y)) => max_abs_diff(x, y),
                _ => f64::INFINITY,
            };
            StepError {
                t,
                mean_error,
                cov_error,
            }
        })
        .collect()
}

fn compare_run(
    system: &StateSpaceSystem,
    rng: &mut RngHandle,
    horizon: usize,
) -> Result<Vec<StepError>, NdlmError> {
    let observations = system.simulate(rng, horizon)?;
    let sequential = filter::filter_smoother(system, &observations)?;
    let joint = brute::condition_full_trajectory(system, &observations)?;
    Ok(compare_moments(&sequential, &joint))
}

/// Compares both posterior paths on `runs` simulated datasets of length `horizon`.
pub fn run(rng: &mut RngHandle, runs: usize, horizon: usize) -> ValidationResult {
    run_with_system(rng, &StateSpaceSystem::toy(), runs, horizon)
}

/// As [`run`], for an arbitrary system.
///
/// A system whose simulation or conditioning fails yields a failed result
/// with infinite errors.
pub fn run_with_system(
    rng: &mut RngHandle,
    system: &StateSpaceSystem,
    runs: usize,
    horizon: usize,
) -> ValidationResult {
    let mut diagnostics = KalmanDiagnostics {
        horizon,
        state_dim: system.state_dim(),
        channels: system.channels.len(),
        runs,
        max_abs_mean_error: 0.0,
        max_abs_cov_error: 0.0,
        tolerance: TOLERANCE,
        worst_run_steps: Vec::new(),
    };
    let mut worst_run = f64::NEG_INFINITY;

    for run_idx in 0..runs {
        let steps = match compare_run(system, rng, horizon) {
            Ok(steps) => steps,
            Err(err) => {
                diagnostics.max_abs_mean_error = f64::INFINITY;
                diagnostics.max_abs_cov_error = f64::INFINITY;
                return ValidationResult::from_error(
                    CheckerId::KalmanEquivalence,
                    &err,
                    Diagnostics::Kalman(diagnostics),
                );
            }
        };
        let mean_error = steps.iter().map(|s| s.mean_error).fold(0.0, max_error);
        let cov_error = steps.iter().map(|s| s.cov_error).fold(0.0, max_error);
        diagnostics.max_abs_mean_error = max_error(diagnostics.max_abs_mean_error, mean_error);
        diagnostics.max_abs_cov_error = max_error(diagnostics.max_abs_cov_error, cov_error);

        let run_error = max_error(mean_error, cov_error);
        if run_error > worst_run {
            debug!(run = run_idx, mean_error, cov_error, "new worst kalman run");
            worst_run = run_error;
            diagnostics.worst_run_steps = steps;
        }
    }

    let passed =
        diagnostics.max_abs_mean_error < TOLERANCE && diagnostics.max_abs_cov_error < TOLERANCE;
    ValidationResult::from_verdict(
        CheckerId::KalmanEquivalence,
        passed,
        Diagnostics::Kalman(diagnostics),
    )
}
