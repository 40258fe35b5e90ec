use nalgebra::DMatrix;
use ndlm_core::RngHandle;
use tracing::debug;

use crate::checker::CheckerId;
use crate::checks::offset_spread;
use crate::diagnostics::{Diagnostics, InverseWishartDiagnostics, InverseWishartTrial};
use crate::linalg::{max_error, random_spd, spd_log_det_and_inverse, standard_normal_matrix};
use crate::result::ValidationResult;

/// Maximum tolerated spread of the log-kernel offset.
pub const TOLERANCE: f64 = 1e-10;

/// Log inverse-Wishart kernel `-(nu + d + 1)/2 ln|W| - tr(S W^-1)/2`.
///
/// Returns `-inf` when `W` is not positive definite.
pub fn log_iw_kernel(w: &DMatrix<f64>, nu: f64, scale: &DMatrix<f64>) -> f64 {
    let d = w.nrows() as f64;
    match spd_log_det_and_inverse(w) {
        Some((log_det, w_inv)) => -0.5 * (nu + d + 1.0) * log_det - 0.5 * (scale * w_inv).trace(),
        None => f64::NEG_INFINITY,
    }
}

/// Log likelihood kernel of `t` zero-mean Gaussian innovations with scatter `scatter`.
///
/// Returns `-inf` when `W` is not positive definite.
pub fn log_innovation_likelihood(w: &DMatrix<f64>, t: usize, scatter: &DMatrix<f64>) -> f64 {
    match spd_log_det_and_inverse(w) {
        Some((log_det, w_inv)) => -0.5 * t as f64 * log_det - 0.5 * (scatter * w_inv).trace(),
        None => f64::NEG_INFINITY,
    }
}

/// Log-kernel difference `log prior + log likelihood - log posterior` at `w`.
///
/// Undefined kernels yield a non-finite value, which [`offset_spread`] treats
/// as a mismatch.
pub fn kernel_offset(
    w: &DMatrix<f64>,
    prior: (f64, &DMatrix<f64>),
    t: usize,
    scatter: &DMatrix<f64>,
    posterior: (f64, &DMatrix<f64>),
) -> f64 {
    let lp_prior = log_iw_kernel(w, prior.0, prior.1);
    let lp_like = log_innovation_likelihood(w, t, scatter);
    let lp_post = log_iw_kernel(w, posterior.0, posterior.1);
    if !(lp_prior.is_finite() && lp_like.is_finite() && lp_post.is_finite()) {
        return f64::NAN;
    }
    lp_prior + lp_like - lp_post
}

/// Checks the IW conjugate update over `n_trials` random data sets, each
/// evaluated at `samples` random SPD matrices.
pub fn run(rng: &mut RngHandle, n_trials: usize, samples: usize) -> ValidationResult {
    let mut max_std = 0.0;
    let mut total_degenerate = 0usize;
    let mut worst_case: Option<InverseWishartTrial> = None;

    for _ in 0..n_trials {
        let d = rng.integer(2, 5);
        let t = rng.integer(6, 25);
        let nu0 = d as f64 + rng.uniform(2.0, 9.0);
        let s0 = random_spd(rng, d);

        let innovations = standard_normal_matrix(rng, t, d);
        let scatter = innovations.transpose() * &innovations;

        let nu1 = nu0 + t as f64;
        let s1 = &s0 + &scatter;

        let mut degenerate_points = 0usize;
        let diffs: Vec<f64> = (0..samples)
            .map(|_| {
                let w = random_spd(rng, d);
                let offset = kernel_offset(&w, (nu0, &s0), t, &scatter, (nu1, &s1));
                if !offset.is_finite() {
                    degenerate_points += 1;
                    debug!(d, t, "inverse-wishart kernel undefined at sampled matrix");
                }
                offset
            })
            .collect();
        total_degenerate += degenerate_points;
        let std_diff = offset_spread(&diffs);

        if worst_case.is_none() || std_diff > max_std || std_diff.is_nan() {
            debug!(d, t, std_diff, "new worst inverse-wishart trial");
            worst_case = Some(InverseWishartTrial {
                d,
                t,
                nu0,
                nu1,
                std_diff,
                degenerate_points,
            });
        }
        max_std = max_error(max_std, std_diff);
    }

    let passed = max_std < TOLERANCE;
    ValidationResult::from_verdict(
        CheckerId::InverseWishartConjugacy,
        passed,
        Diagnostics::InverseWishart(InverseWishartDiagnostics {
            max_std_of_kernel_difference: max_std,
            tolerance: TOLERANCE,
            evaluation_samples: samples,
            degenerate_points: total_degenerate,
            worst_case,
        }),
    )
}
