use serde::{Deserialize, Serialize};

use crate::linalg::max_error;

/// Diagnostics payload attached to a [`crate::ValidationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "checker", rename_all = "snake_case")]
pub enum Diagnostics {
    /// Likelihood normalization cases.
    Normalization(NormalizationDiagnostics),
    /// Joint/marginal quadrature cases.
    JointMarginal(JointMarginalDiagnostics),
    /// Inverse-gamma kernel offsets.
    InverseGamma(InverseGammaDiagnostics),
    /// Inverse-Wishart kernel offsets.
    InverseWishart(InverseWishartDiagnostics),
    /// Gradient/Hessian finite-difference errors.
    GradientHessian(GradientDiagnostics),
    /// Filter/smoother against brute-force conditioning.
    Kalman(KalmanDiagnostics),
    /// Sequential against aggregated replicate assimilation.
    Replicate(ReplicateDiagnostics),
}

impl Diagnostics {
    /// Largest error metric carried by the payload, used for log lines.
    pub fn headline_error(&self) -> f64 {
        match self {
            Diagnostics::Normalization(diag) => diag.max_abs_error,
            Diagnostics::JointMarginal(diag) => diag.max_relative_error,
            Diagnostics::InverseGamma(diag) => diag.max_std_of_kernel_difference,
            Diagnostics::InverseWishart(diag) => diag.max_std_of_kernel_difference,
            Diagnostics::GradientHessian(diag) => {
                max_error(diag.max_abs_gradient_error, diag.max_abs_hessian_error)
            }
            Diagnostics::Kalman(diag) => {
                max_error(diag.max_abs_mean_error, diag.max_abs_cov_error)
            }
            Diagnostics::Replicate(diag) => {
                max_error(diag.max_abs_mean_error, diag.max_abs_cov_error)
            }
        }
    }
}

/// One integrated Gaussian density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationCase {
    /// Density mean.
    pub mean: f64,
    /// Density variance.
    pub variance: f64,
    /// Quadrature value of the integral.
    pub integral: f64,
    /// `|integral - 1|`.
    pub abs_error: f64,
    /// Quadrature error estimate.
    pub quadrature_error: f64,
    /// Whether the quadrature met its requested tolerance.
    pub converged: bool,
}

/// Diagnostics for the likelihood normalization checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationDiagnostics {
    /// Maximum `|integral - 1|` over all cases.
    pub max_abs_error: f64,
    /// Tolerance applied to `max_abs_error`.
    pub tolerance: f64,
    /// Every case, in draw order.
    pub cases: Vec<NormalizationCase>,
    /// Case with the largest error.
    pub worst_case: Option<NormalizationCase>,
}

/// One marginal density comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalCase {
    /// Prior mean of the latent state.
    pub m: f64,
    /// Prior variance of the latent state.
    pub c: f64,
    /// Observation loading.
    pub h: f64,
    /// Observation noise variance.
    pub r: f64,
    /// Evaluation point.
    pub y: f64,
    /// Density obtained by integrating out the latent state.
    pub numerical: f64,
    /// Closed-form marginal density.
    pub closed_form: f64,
    /// Relative error between both densities.
    pub relative_error: f64,
    /// Whether the quadrature met its requested tolerance.
    pub converged: bool,
}

/// Diagnostics for the joint/marginal consistency checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointMarginalDiagnostics {
    /// Maximum relative error over all cases.
    pub max_relative_error: f64,
    /// Tolerance applied to `max_relative_error`.
    pub tolerance: f64,
    /// Every case, in draw order.
    pub cases: Vec<MarginalCase>,
    /// Case with the largest relative error.
    pub worst_case: Option<MarginalCase>,
}

/// Worst inverse-gamma trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverseGammaTrial {
    /// Number of synthetic residuals.
    pub n: usize,
    /// Residual sum of squares.
    pub sse: f64,
    /// Prior shape.
    pub a0: f64,
    /// Prior scale.
    pub b0: f64,
    /// Posterior shape.
    pub a1: f64,
    /// Posterior scale.
    pub b1: f64,
    /// Standard deviation of the log-kernel differences.
    pub std_diff: f64,
}

/// Diagnostics for the inverse-gamma conjugacy checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverseGammaDiagnostics {
    /// Largest standard deviation over all trials.
    pub max_std_of_kernel_difference: f64,
    /// Tolerance applied to the standard deviation.
    pub tolerance: f64,
    /// Number of log-spaced variances evaluated per trial.
    pub grid_points: usize,
    /// Trial with the largest spread.
    pub worst_case: Option<InverseGammaTrial>,
}

/// Worst inverse-Wishart trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverseWishartTrial {
    /// Covariance dimension.
    pub d: usize,
    /// Number of innovation vectors in the scatter matrix.
    pub t: usize,
    /// Prior degrees of freedom.
    pub nu0: f64,
    /// Posterior degrees of freedom.
    pub nu1: f64,
    /// Standard deviation of the log-kernel differences.
    pub std_diff: f64,
    /// Evaluation matrices whose kernel was undefined.
    pub degenerate_points: usize,
}

/// Diagnostics for the inverse-Wishart conjugacy checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverseWishartDiagnostics {
    /// Largest standard deviation over all trials.
    pub max_std_of_kernel_difference: f64,
    /// Tolerance applied to the standard deviation.
    pub tolerance: f64,
    /// SPD evaluation matrices sampled per trial.
    pub evaluation_samples: usize,
    /// Undefined kernel evaluations across all trials.
    pub degenerate_points: usize,
    /// Trial with the largest spread.
    pub worst_case: Option<InverseWishartTrial>,
}

/// Worst gradient/Hessian trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientTrial {
    /// Number of regression observations.
    pub t: usize,
    /// Point at which derivatives were compared.
    pub lambda: f64,
    /// Known observation noise variance.
    pub noise_variance: f64,
    /// Prior mean of lambda.
    pub prior_mean: f64,
    /// Prior variance of lambda.
    pub prior_variance: f64,
    /// Closed-form gradient.
    pub analytic_gradient: f64,
    /// Centered finite-difference gradient.
    pub numeric_gradient: f64,
    /// Closed-form Hessian.
    pub analytic_hessian: f64,
    /// Centered finite-difference Hessian.
    pub numeric_hessian: f64,
}

/// Diagnostics for the gradient/Hessian checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDiagnostics {
    /// Maximum absolute gradient error.
    pub max_abs_gradient_error: f64,
    /// Maximum absolute Hessian error.
    pub max_abs_hessian_error: f64,
    /// Gradient tolerance.
    pub gradient_tolerance: f64,
    /// Hessian tolerance.
    pub hessian_tolerance: f64,
    /// Finite-difference step.
    pub step: f64,
    /// Trial with the largest tolerance-scaled error.
    pub worst_case: Option<GradientTrial>,
}

/// Per-time-step discrepancy between both posterior paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepError {
    /// Time index, `0..=T`.
    pub t: usize,
    /// Maximum absolute difference between posterior means.
    pub mean_error: f64,
    /// Maximum absolute entrywise difference between posterior covariances.
    pub cov_error: f64,
}

/// Diagnostics for the Kalman equivalence checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KalmanDiagnostics {
    /// Time horizon `T`.
    pub horizon: usize,
    /// Latent state dimension.
    pub state_dim: usize,
    /// Observation channels per time step.
    pub channels: usize,
    /// Number of simulated datasets compared.
    pub runs: usize,
    /// Maximum mean difference over all runs and time steps.
    pub max_abs_mean_error: f64,
    /// Maximum covariance difference over all runs and time steps.
    pub max_abs_cov_error: f64,
    /// Tolerance applied to both maxima.
    pub tolerance: f64,
    /// Per-step errors of the worst run.
    pub worst_run_steps: Vec<StepError>,
}

/// Worst replicate trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateTrial {
    /// Replicate count `I`.
    pub replicates: usize,
    /// Shared per-replicate noise variance.
    pub noise_variance: f64,
    /// Maximum mean difference.
    pub mean_error: f64,
    /// Maximum covariance difference.
    pub cov_error: f64,
}

/// Diagnostics for the replicate aggregation checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateDiagnostics {
    /// Maximum mean difference over all trials.
    pub max_abs_mean_error: f64,
    /// Maximum covariance difference over all trials.
    pub max_abs_cov_error: f64,
    /// Tolerance applied to both maxima.
    pub tolerance: f64,
    /// Trial with the largest discrepancy.
    pub worst_case: Option<ReplicateTrial>,
}
