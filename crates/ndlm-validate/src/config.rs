use ndlm_core::{ErrorInfo, NdlmError};
use serde::{Deserialize, Serialize};

use crate::quadrature::QuadratureOpts;

/// Largest trial count accepted for any checker.
pub const MAX_TRIALS: usize = 60;

/// Longest Kalman time horizon accepted.
pub const MAX_HORIZON: usize = 25;

fn config_error(code: &str, message: impl Into<String>) -> NdlmError {
    NdlmError::Config(ErrorInfo::new(code, message))
}

fn default_seed() -> u64 {
    20_260_207
}

fn default_horizon() -> usize {
    4
}

/// Complete configuration of one suite run.
///
/// Every field has a default, so an empty YAML document is a valid config
/// reproducing the reference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Master seed of the shared trial stream.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Per-checker trial counts.
    #[serde(default)]
    pub trials: TrialCounts,
    /// Quadrature settings for the two integration checkers.
    #[serde(default)]
    pub quadrature: QuadratureOpts,
    /// Time horizon `T` of the Kalman toy system.
    #[serde(default = "default_horizon")]
    pub kalman_horizon: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            trials: TrialCounts::default(),
            quadrature: QuadratureOpts::default(),
            kalman_horizon: default_horizon(),
        }
    }
}

impl SuiteConfig {
    /// Default configuration with a different seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Rejects configurations outside the supported problem sizes.
    pub fn validate(&self) -> Result<(), NdlmError> {
        for (name, count) in self.trials.named() {
            if count == 0 {
                return Err(NdlmError::Config(
                    ErrorInfo::new("zero-trials", "trial counts must be positive")
                        .with_context("field", name),
                ));
            }
            if count > MAX_TRIALS {
                return Err(NdlmError::Config(
                    ErrorInfo::new("too-many-trials", "trial count exceeds supported maximum")
                        .with_context("field", name)
                        .with_context("value", count.to_string())
                        .with_context("max", MAX_TRIALS.to_string()),
                ));
            }
        }
        if self.kalman_horizon == 0 || self.kalman_horizon > MAX_HORIZON {
            return Err(config_error(
                "invalid-horizon",
                format!(
                    "kalman_horizon must lie in 1..={MAX_HORIZON}, got {}",
                    self.kalman_horizon
                ),
            ));
        }
        let quad = &self.quadrature;
        if !(quad.epsabs > 0.0 && quad.epsrel > 0.0) {
            return Err(config_error(
                "invalid-quadrature-tolerance",
                "quadrature tolerances must be strictly positive",
            ));
        }
        if quad.limit == 0 || quad.initial_segments == 0 {
            return Err(config_error(
                "invalid-quadrature-limit",
                "quadrature segment counts must be positive",
            ));
        }
        Ok(())
    }
}

fn default_normalization() -> usize {
    12
}

fn default_joint_marginal() -> usize {
    10
}

fn default_inverse_gamma() -> usize {
    20
}

fn default_inverse_wishart() -> usize {
    12
}

fn default_iw_samples() -> usize {
    40
}

fn default_gradient() -> usize {
    25
}

fn default_kalman() -> usize {
    1
}

fn default_replicate() -> usize {
    25
}

/// Number of random trials drawn by each checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialCounts {
    /// Gaussian densities integrated.
    #[serde(default = "default_normalization")]
    pub normalization: usize,
    /// Marginal densities compared.
    #[serde(default = "default_joint_marginal")]
    pub joint_marginal: usize,
    /// Inverse-gamma updates checked.
    #[serde(default = "default_inverse_gamma")]
    pub inverse_gamma: usize,
    /// Inverse-Wishart updates checked.
    #[serde(default = "default_inverse_wishart")]
    pub inverse_wishart: usize,
    /// SPD evaluation matrices per inverse-Wishart trial.
    #[serde(default = "default_iw_samples")]
    pub iw_evaluation_samples: usize,
    /// Gradient/Hessian evaluation points.
    #[serde(default = "default_gradient")]
    pub gradient: usize,
    /// Simulated datasets for the Kalman equivalence check.
    #[serde(default = "default_kalman")]
    pub kalman: usize,
    /// Replicate aggregation trials.
    #[serde(default = "default_replicate")]
    pub replicate: usize,
}

impl Default for TrialCounts {
    fn default() -> Self {
        Self {
            normalization: default_normalization(),
            joint_marginal: default_joint_marginal(),
            inverse_gamma: default_inverse_gamma(),
            inverse_wishart: default_inverse_wishart(),
            iw_evaluation_samples: default_iw_samples(),
            gradient: default_gradient(),
            kalman: default_kalman(),
            replicate: default_replicate(),
        }
    }
}

impl TrialCounts {
    fn named(&self) -> [(&'static str, usize); 8] {
        [
            ("normalization", self.normalization),
            ("joint_marginal", self.joint_marginal),
            ("inverse_gamma", self.inverse_gamma),
            ("inverse_wishart", self.inverse_wishart),
            ("iw_evaluation_samples", self.iw_evaluation_samples),
            ("gradient", self.gradient),
            ("kalman", self.kalman),
            ("replicate", self.replicate),
        ]
    }
}
