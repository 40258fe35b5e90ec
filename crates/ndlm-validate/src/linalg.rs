use nalgebra::{DMatrix, DVector};
use ndlm_core::{ErrorInfo, NdlmError, RngHandle};

/// Draws a matrix with independent standard normal entries.
pub fn standard_normal_matrix(rng: &mut RngHandle, rows: usize, cols: usize) -> DMatrix<f64> {
    let mut out = DMatrix::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            out[(i, j)] = rng.standard_normal();
        }
    }
    out
}

/// Draws a vector with independent `N(0, sd^2)` entries.
pub fn normal_vector(rng: &mut RngHandle, len: usize, sd: f64) -> DVector<f64> {
    DVector::from_vec(rng.normal_vec(len, sd))
}

/// Draws `A A^T + d I` with standard normal `A`, which is SPD by construction.
pub fn random_spd(rng: &mut RngHandle, d: usize) -> DMatrix<f64> {
    let a = standard_normal_matrix(rng, d, d);
    &a * a.transpose() + DMatrix::identity(d, d) * d as f64
}

/// Draws from `N(mean, cov)` through the Cholesky factor of `cov`.
pub fn sample_mvn(
    rng: &mut RngHandle,
    mean: &DVector<f64>,
    cov: &DMatrix<f64>,
) -> Result<DVector<f64>, NdlmError> {
    if cov.nrows() != mean.len() || cov.ncols() != mean.len() {
        return Err(NdlmError::Sampling(
            ErrorInfo::new("shape-mismatch", "covariance does not match mean length")
                .with_context("mean", mean.len().to_string())
                .with_context("rows", cov.nrows().to_string())
                .with_context("cols", cov.ncols().to_string()),
        ));
    }
    let chol = cov.clone().cholesky().ok_or_else(|| {
        NdlmError::Sampling(
            ErrorInfo::new("not-spd", "sampling covariance is not positive definite")
                .with_hint("construct covariances as A A^T + c I"),
        )
    })?;
    let z = normal_vector(rng, mean.len(), 1.0);
    Ok(mean + chol.l() * z)
}

/// Returns `(log det W, W^-1)` for an SPD matrix, or `None` when the Cholesky
/// factorisation fails.
pub fn spd_log_det_and_inverse(w: &DMatrix<f64>) -> Option<(f64, DMatrix<f64>)> {
    let chol = w.clone().cholesky()?;
    let log_det = 2.0 * chol.l().diagonal().iter().map(|v| v.ln()).sum::<f64>();
    Some((log_det, chol.inverse()))
}

/// Inverse of a small square matrix.
pub fn invert(m: &DMatrix<f64>, what: &str) -> Result<DMatrix<f64>, NdlmError> {
    m.clone().try_inverse().ok_or_else(|| {
        NdlmError::Linalg(
            ErrorInfo::new("singular", format!("{what} is singular"))
                .with_context("rows", m.nrows().to_string()),
        )
    })
}

/// Replaces `m` by `(m + m^T) / 2`.
pub fn symmetrize(m: &mut DMatrix<f64>) {
    let sym = (&*m + m.transpose()) * 0.5;
    *m = sym;
}

/// Maximum absolute entrywise difference.
pub fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    if a.shape() != b.shape() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, max_error)
}

/// Maximum absolute difference between two vectors.
pub fn max_abs_diff_vec(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, max_error)
}

/// Running maximum of error metrics where NaN counts as an infinite error.
pub fn max_error(acc: f64, value: f64) -> f64 {
    if value.is_nan() {
        f64::INFINITY
    } else {
        acc.max(value)
    }
}
