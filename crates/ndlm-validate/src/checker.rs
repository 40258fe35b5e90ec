use serde::{Deserialize, Serialize};

/// Identifies one checker of the suite.
///
/// [`CheckerId::ALL`] lists the checkers in the order the suite runner
/// invokes them. That order fixes how the shared trial stream is consumed and
/// must not change between releases without bumping the report schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckerId {
    /// Univariate Gaussian density integrates to one.
    LikelihoodNormalization,
    /// Integrating the latent state recovers the closed-form marginal.
    JointMarginal,
    /// Inverse-gamma conjugate update for the observation variance.
    InverseGammaConjugacy,
    /// Inverse-Wishart conjugate update for the evolution covariance.
    InverseWishartConjugacy,
    /// Analytic gradient and Hessian of the regression coefficient posterior.
    GradientHessian,
    /// Kalman filter plus RTS smoother against whole-trajectory conditioning.
    KalmanEquivalence,
    /// Sequential replicate assimilation against the aggregated update.
    ReplicateAggregation,
}

impl CheckerId {
    /// All checkers in suite order.
    pub const ALL: [CheckerId; 7] = [
        CheckerId::LikelihoodNormalization,
        CheckerId::JointMarginal,
        CheckerId::InverseGammaConjugacy,
        CheckerId::InverseWishartConjugacy,
        CheckerId::GradientHessian,
        CheckerId::KalmanEquivalence,
        CheckerId::ReplicateAggregation,
    ];

    /// Stable identifier recorded in [`crate::ValidationResult::name`].
    pub fn name(self) -> &'static str {
        match self {
            CheckerId::LikelihoodNormalization => "gaussian_likelihood_normalization",
            CheckerId::JointMarginal => "joint_marginal_gaussian_consistency",
            CheckerId::InverseGammaConjugacy => "observation_variance_ig_conjugacy",
            CheckerId::InverseWishartConjugacy => "evolution_covariance_iw_conjugacy",
            CheckerId::GradientHessian => "lambda_gradient_hessian",
            CheckerId::KalmanEquivalence => "kalman_ffbs_vs_bruteforce",
            CheckerId::ReplicateAggregation => "replicate_sufficient_statistic_assimilation",
        }
    }

    /// Opaque citation into the derivation documents. Never parsed here.
    pub fn equation_refs(self) -> &'static str {
        match self {
            CheckerId::LikelihoodNormalization => {
                "docs/derivations/sections/01_notation_and_model.tex:eq:A_obs,eq:B_obs,eq:C_obs"
            }
            CheckerId::JointMarginal => {
                "docs/derivations/sections/02_joint_density.tex:eq:joint_A,eq:joint_B,eq:joint_C"
            }
            CheckerId::InverseGammaConjugacy => {
                "docs/derivations/sections/04_static_conditionals.tex:eq:cond_sigma"
            }
            CheckerId::InverseWishartConjugacy => {
                "docs/derivations/sections/04_static_conditionals.tex:eq:cond_W"
            }
            CheckerId::GradientHessian => {
                "docs/derivations/sections/04_static_conditionals.tex:eq:lambda_var,eq:lambda_mean,eq:cond_lambda"
            }
            CheckerId::KalmanEquivalence => {
                "docs/derivations/sections/03_state_posterior_ffbs.tex:eq:kf_f,eq:kf_K,eq:kf_m,eq:kf_C,eq:ffbs_cond"
            }
            CheckerId::ReplicateAggregation => {
                "docs/derivations/sections/10_sufficient_statistics.tex:eq:replicate_sufficient,eq:sse_decomposition"
            }
        }
    }

    /// One-line description of the identity under test.
    pub fn description(self) -> &'static str {
        match self {
            CheckerId::LikelihoodNormalization => {
                "Gaussian observation density integrates to one over the real line"
            }
            CheckerId::JointMarginal => {
                "Quadrature over the latent state reproduces N(h*m, h^2*c + r)"
            }
            CheckerId::InverseGammaConjugacy => {
                "IG prior times Gaussian likelihood equals the IG posterior kernel up to a constant"
            }
            CheckerId::InverseWishartConjugacy => {
                "IW prior times innovation likelihood equals the IW posterior kernel up to a constant"
            }
            CheckerId::GradientHessian => {
                "Closed-form lambda gradient and Hessian agree with centered finite differences"
            }
            CheckerId::KalmanEquivalence => {
                "Kalman filter with RTS smoothing equals brute-force joint Gaussian conditioning"
            }
            CheckerId::ReplicateAggregation => {
                "Per-replicate assimilation equals one update with the replicate mean and r/I"
            }
        }
    }

    pub(crate) fn pass_details(self) -> &'static str {
        match self {
            CheckerId::LikelihoodNormalization => {
                "Every sampled Gaussian likelihood integrated to one within tolerance."
            }
            CheckerId::JointMarginal => {
                "Integrating the latent state out of the joint recovers the closed-form Gaussian marginal."
            }
            CheckerId::InverseGammaConjugacy => {
                "IG posterior kernel matches prior times likelihood up to an additive constant."
            }
            CheckerId::InverseWishartConjugacy => {
                "IW posterior kernel matches prior times innovation likelihood up to an additive constant."
            }
            CheckerId::GradientHessian => {
                "Lambda gradient and Hessian match centered finite differences."
            }
            CheckerId::KalmanEquivalence => {
                "Kalman filter and RTS smoother moments match brute-force Gaussian conditioning on the toy system."
            }
            CheckerId::ReplicateAggregation => {
                "Sequential replicate assimilation equals the sufficient-statistic aggregated update."
            }
        }
    }

    pub(crate) fn fail_details(self) -> &'static str {
        match self {
            CheckerId::LikelihoodNormalization => {
                "Gaussian likelihood normalization over the real line failed."
            }
            CheckerId::JointMarginal => "Joint-to-marginal Gaussian consistency failed.",
            CheckerId::InverseGammaConjugacy => "IG posterior-kernel equivalence failed.",
            CheckerId::InverseWishartConjugacy => "IW posterior-kernel equivalence failed.",
            CheckerId::GradientHessian => {
                "Lambda gradient or Hessian disagrees with finite differences."
            }
            CheckerId::KalmanEquivalence => {
                "Kalman filter and RTS smoother moments do not match brute-force Gaussian conditioning."
            }
            CheckerId::ReplicateAggregation => {
                "Sequential replicate assimilation and aggregated assimilation differ."
            }
        }
    }
}

impl std::fmt::Display for CheckerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
