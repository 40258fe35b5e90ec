use nalgebra::{DMatrix, DVector};
use ndlm_core::RngHandle;

use crate::checker::CheckerId;
use crate::checks::kalman::filter::assimilate_scalar;
use crate::diagnostics::{Diagnostics, ReplicateDiagnostics, ReplicateTrial};
use crate::linalg::{max_abs_diff, max_abs_diff_vec, max_error, normal_vector, random_spd, sample_mvn};
use crate::result::ValidationResult;

/// Maximum tolerated mean and covariance difference.
pub const TOLERANCE: f64 = 1e-10;

/// Latent dimension of every trial.
pub const STATE_DIM: usize = 3;

/// Assimilates each replicate in turn with the shared variance `r`.
pub fn sequential_update(
    mean: &DVector<f64>,
    cov: &DMatrix<f64>,
    loading: &DVector<f64>,
    r: f64,
    replicates: &[f64],
) -> (DVector<f64>, DMatrix<f64>) {
    let mut m = mean.clone();
    let mut c = cov.clone();
    for &y in replicates {
        assimilate_scalar(&mut m, &mut c, loading, r, y);
    }
    (m, c)
}

/// One update with the replicate mean and effective variance `r / I`.
///
/// Only valid when every replicate shares the variance `r`; unequal variances
/// would need inverse-variance weighting instead.
pub fn aggregated_update(
    mean: &DVector<f64>,
    cov: &DMatrix<f64>,
    loading: &DVector<f64>,
    r: f64,
    replicates: &[f64],
) -> (DVector<f64>, DMatrix<f64>) {
    let count = replicates.len() as f64;
    let y_bar = replicates.iter().sum::<f64>() / count;
    let mut m = mean.clone();
    let mut c = cov.clone();
    assimilate_scalar(&mut m, &mut c, loading, r / count, y_bar);
    (m, c)
}

/// Compares sequential and aggregated assimilation over `n_trials` problems.
pub fn run(rng: &mut RngHandle, n_trials: usize) -> ValidationResult {
    let mut max_mean_err = 0.0;
    let mut max_cov_err = 0.0;
    let mut worst_score = 0.0;
    let mut worst_case: Option<ReplicateTrial> = None;

    for _ in 0..n_trials {
        let cov = random_spd(rng, STATE_DIM);
        let mean = normal_vector(rng, STATE_DIM, 1.0);
        let loading = normal_vector(rng, STATE_DIM, 1.0);
        let r = rng.log_normal(-0.2, 0.3);
        let count = rng.integer(2, 10);

        let truth = match sample_mvn(rng, &mean, &cov) {
            Ok(x) => x,
            Err(err) => {
                return ValidationResult::from_error(
                    CheckerId::ReplicateAggregation,
                    &err,
                    Diagnostics::Replicate(ReplicateDiagnostics {
                        max_abs_mean_error: f64::INFINITY,
                        max_abs_cov_error: f64::INFINITY,
                        tolerance: TOLERANCE,
                        worst_case,
                    }),
                );
            }
        };
        let signal = loading.dot(&truth);
        let replicates: Vec<f64> = (0..count)
            .map(|_| signal + rng.normal(0.0, r.sqrt()))
            .collect();

        let (m_seq, c_seq) = sequential_update(&mean, &cov, &loading, r, &replicates);
        let (m_agg, c_agg) = aggregated_update(&mean, &cov, &loading, r, &replicates);

        let mean_error = max_abs_diff_vec(&m_seq, &m_agg);
        let cov_error = max_abs_diff(&c_seq, &c_agg);
        max_mean_err = max_error(max_mean_err, mean_error);
        max_cov_err = max_error(max_cov_err, cov_error);

        let score = max_error(mean_error, cov_error);
        if worst_case.is_none() || score > worst_score {
            worst_score = score;
            worst_case = Some(ReplicateTrial {
                replicates: count,
                noise_variance: r,
                mean_error,
                cov_error,
            });
        }
    }

    let passed = max_mean_err < TOLERANCE && max_cov_err < TOLERANCE;
    ValidationResult::from_verdict(
        CheckerId::ReplicateAggregation,
        passed,
        Diagnostics::Replicate(ReplicateDiagnostics {
            max_abs_mean_error: max_mean_err,
            max_abs_cov_error: max_cov_err,
            tolerance: TOLERANCE,
            worst_case,
        }),
    )
}
