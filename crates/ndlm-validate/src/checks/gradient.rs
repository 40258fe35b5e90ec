use ndlm_core::RngHandle;

use crate::checker::CheckerId;
use crate::diagnostics::{Diagnostics, GradientDiagnostics, GradientTrial};
use crate::linalg::max_error;
use crate::result::ValidationResult;

/// Maximum tolerated absolute gradient error.
pub const GRADIENT_TOLERANCE: f64 = 1e-7;

/// Maximum tolerated absolute Hessian error.
pub const HESSIAN_TOLERANCE: f64 = 1e-4;

/// Centered finite-difference step.
pub const STEP: f64 = 1e-4;

/// Regression data and Gaussian prior defining the lambda log-posterior.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaPosterior {
    /// Regressor values `z_{t-1}`.
    pub regressor: Vec<f64>,
    /// Observed responses.
    pub observed: Vec<f64>,
    /// Known noise variance.
    pub noise_variance: f64,
    /// Prior mean.
    pub prior_mean: f64,
    /// Prior variance.
    pub prior_variance: f64,
}

impl LambdaPosterior {
    /// Unnormalised log-posterior at `lambda`.
    pub fn log_density(&self, lambda: f64) -> f64 {
        let sse: f64 = self
            .regressor
            .iter()
            .zip(&self.observed)
            .map(|(z, y)| {
                let resid = y - lambda * z;
                resid * resid
            })
            .sum();
        let dev = lambda - self.prior_mean;
        -0.5 / self.noise_variance * sse - 0.5 / self.prior_variance * dev * dev
    }

    /// Closed-form gradient `sum z (y - lambda z) / w - (lambda - m0) / c0`.
    pub fn gradient(&self, lambda: f64) -> f64 {
        let score: f64 = self
            .regressor
            .iter()
            .zip(&self.observed)
            .map(|(z, y)| z * (y - lambda * z))
            .sum();
        score / self.noise_variance - (lambda - self.prior_mean) / self.prior_variance
    }

    /// Closed-form Hessian `-sum z^2 / w - 1 / c0`.
    pub fn hessian(&self) -> f64 {
        let info: f64 = self.regressor.iter().map(|z| z * z).sum();
        -info / self.noise_variance - 1.0 / self.prior_variance
    }

    /// Centered finite-difference `(gradient, hessian)` with step `eps`.
    pub fn finite_difference(&self, lambda: f64, eps: f64) -> (f64, f64) {
        let f0 = self.log_density(lambda);
        let fp = self.log_density(lambda + eps);
        let fm = self.log_density(lambda - eps);
        ((fp - fm) / (2.0 * eps), (fp - 2.0 * f0 + fm) / (eps * eps))
    }
}

/// Compares analytic and finite-difference derivatives over `n_trials` problems.
pub fn run(rng: &mut RngHandle, n_trials: usize) -> ValidationResult {
    let mut max_grad_err = 0.0;
    let mut max_hess_err = 0.0;
    let mut worst_score = 0.0;
    let mut worst_case: Option<GradientTrial> = None;

    for _ in 0..n_trials {
        let t = rng.integer(12, 40);
        let regressor = rng.normal_vec(t, 1.0);
        let structured = rng.normal_vec(t, 0.5);
        let lambda_true = rng.normal(0.0, 0.4);
        let noise_variance = rng.log_normal(-0.1, 0.2);
        let noise_sd = noise_variance.sqrt();
        let observed: Vec<f64> = regressor
            .iter()
            .zip(&structured)
            .map(|(z, psi)| lambda_true * z + psi + rng.normal(0.0, noise_sd))
            .collect();
        let prior_mean = rng.normal(0.0, 0.2);
        let prior_variance = rng.log_normal(-0.2, 0.3);
        let lambda = rng.normal(0.0, 0.3);

        let posterior = LambdaPosterior {
            regressor,
            observed,
            noise_variance,
            prior_mean,
            prior_variance,
        };
        let analytic_gradient = posterior.gradient(lambda);
        let analytic_hessian = posterior.hessian();
        let (numeric_gradient, numeric_hessian) = posterior.finite_difference(lambda, STEP);

        let grad_err = (analytic_gradient - numeric_gradient).abs();
        let hess_err = (analytic_hessian - numeric_hessian).abs();
        max_grad_err = max_error(max_grad_err, grad_err);
        max_hess_err = max_error(max_hess_err, hess_err);

        let score = max_error(grad_err / GRADIENT_TOLERANCE, hess_err / HESSIAN_TOLERANCE);
        if worst_case.is_none() || score > worst_score {
            worst_score = score;
            worst_case = Some(GradientTrial {
                t,
                lambda,
                noise_variance,
                prior_mean,
                prior_variance,
                analytic_gradient,
                numeric_gradient,
                analytic_hessian,
                numeric_hessian,
            });
        }
    }

    let passed = max_grad_err < GRADIENT_TOLERANCE && max_hess_err < HESSIAN_TOLERANCE;
    ValidationResult::from_verdict(
        CheckerId::GradientHessian,
        passed,
        Diagnostics::GradientHessian(GradientDiagnostics {
            max_abs_gradient_error: max_grad_err,
            max_abs_hessian_error: max_hess_err,
            gradient_tolerance: GRADIENT_TOLERANCE,
            hessian_tolerance: HESSIAN_TOLERANCE,
            step: STEP,
            worst_case,
        }),
    )
}
