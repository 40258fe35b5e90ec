/// Inverse-gamma conjugacy for the observation variance.
pub mod conjugacy_ig;
/// Inverse-Wishart conjugacy for the evolution covariance.
pub mod conjugacy_iw;
/// Gradient and Hessian of the lambda log-posterior.
pub mod gradient;
/// Joint-to-marginal Gaussian consistency.
pub mod joint_marginal;
/// Kalman filter and smoother against brute-force conditioning.
pub mod kalman;
/// Gaussian likelihood normalization.
pub mod normalization;
/// Replicate sufficient-statistic aggregation.
pub mod replicate;

/// Population standard deviation of log-kernel differences.
///
/// A non-finite difference marks an undefined kernel evaluation and makes the
/// whole spread infinite, so the trial can never pass.
pub fn offset_spread(diffs: &[f64]) -> f64 {
    if diffs.is_empty() {
        return 0.0;
    }
    if diffs.iter().any(|d| !d.is_finite()) {
        return f64::INFINITY;
    }
    let n = diffs.len() as f64;
    let mean = diffs.iter().sum::<f64>() / n;
    let var = diffs.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n;
    var.sqrt()
}
