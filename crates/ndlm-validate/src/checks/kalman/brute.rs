//! Whole-trajectory path: one Gaussian conditioning step on the stacked
//! states `(x_0, ..., x_T)`.
//!
//! Shares nothing with the sequential path beyond the system definition.

use nalgebra::{DMatrix, DVector};
use ndlm_core::{ErrorInfo, NdlmError};

use super::system::{PosteriorMoments, StateSpaceSystem};

/// Prior moments of the stacked trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPrior {
    /// Stacked mean of length `(T + 1) d`.
    pub mean: DVector<f64>,
    /// Stacked covariance of size `(T + 1) d` square.
    pub covariance: DMatrix<f64>,
}

/// Builds the joint prior over all stacked states.
///
/// Diagonal blocks follow `P_tt = G P_{t-1,t-1} G^T + Q`. Off-diagonal blocks
/// follow from linearity, `P_ts = G P_{t-1,s}` for `t > s`, i.e. `G^{t-s} P_ss`,
/// with `P_st = P_ts^T`.
pub fn joint_prior(system: &StateSpaceSystem, horizon: usize) -> JointPrior {
    let d = system.state_dim();
    let g = &system.transition;
    let steps = horizon + 1;

    let mut mean_blocks: Vec<DVector<f64>> = Vec::with_capacity(steps);
    let mut blocks: Vec<Vec<DMatrix<f64>>> = vec![vec![DMatrix::zeros(d, d); steps]; steps];
    mean_blocks.push(system.initial_mean.clone());
    blocks[0][0] = system.initial_covariance.clone();
    for t in 1..steps {
        mean_blocks.push(g * &mean_blocks[t - 1]);
        blocks[t][t] = g * &blocks[t - 1][t - 1] * g.transpose() + &system.process_covariance;
        for s in 0..t {
            let lagged = g * &blocks[t - 1][s];
            blocks[s][t] = lagged.transpose();
            blocks[t][s] = lagged;
        }
    }

    let n = steps * d;
    let mut mean = DVector::zeros(n);
    let mut covariance = DMatrix::zeros(n, n);
    for t in 0..steps {
        mean.rows_mut(t * d, d).copy_from(&mean_blocks[t]);
        for s in 0..steps {
            covariance
                .view_mut((t * d, s * d), (d, d))
                .copy_from(&blocks[t][s]);
        }
    }
    JointPrior { mean, covariance }
}

/// Conditions the joint prior on every observation at once and slices out the
/// per-step marginals.
pub fn condition_full_trajectory(
    system: &StateSpaceSystem,
    observations: &[DVector<f64>],
) -> Result<PosteriorMoments, NdlmError> {
    let horizon = observations.len();
    let d = system.state_dim();
    let k = system.channels.len();
    let prior = joint_prior(system, horizon);
    let n = prior.mean.len();

    let rows = horizon * k;
    let mut h_big = DMatrix::zeros(rows, n);
    let mut r_big = DMatrix::zeros(rows, rows);
    let mut y_big = DVector::zeros(rows);
    for (step, y_t) in observations.iter().enumerate() {
        let t = step + 1;
        for (idx, channel) in system.channels.iter().enumerate() {
            let row = step * k + idx;
            for col in 0..d {
                h_big[(row, t * d + col)] = channel.loading[col];
            }
            r_big[(row, row)] = channel.variance;
            y_big[row] = y_t[idx];
        }
    }

    // K = C H^T S^-1, so K^T = S^-1 H C with S symmetric.
    let hc = &h_big * &prior.covariance;
    let s = &hc * h_big.transpose() + &r_big;
    let chol = s.cholesky().ok_or_else(|| {
        NdlmError::Linalg(
            ErrorInfo::new("not-spd", "stacked innovation covariance is not positive definite")
                .with_context("rows", rows.to_string()),
        )
    })?;
    let gain = chol.solve(&hc).transpose();

    let residual = &y_big - &h_big * &prior.mean;
    let post_mean = &prior.mean + &gain * residual;
    let post_cov = &prior.covariance - &gain * &hc;
    let post_cov = (&post_cov + post_cov.transpose()) * 0.5;

    let mut means = Vec::with_capacity(horizon + 1);
    let mut covariances = Vec::with_capacity(horizon + 1);
    for t in 0..=horizon {
        means.push(post_mean.rows(t * d, d).into_owned());
        covariances.push(post_cov.view((t * d, t * d), (d, d)).into_owned());
    }
    Ok(PosteriorMoments { means, covariances })
}
