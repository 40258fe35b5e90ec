//! State-space system definition and trajectory simulation.

use nalgebra::{DMatrix, DVector};
use ndlm_core::{NdlmError, RngHandle};

use crate::linalg::sample_mvn;

/// Scalar observation `y = H x + v`, `v ~ N(0, variance)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationChannel {
    /// Loading vector `H`.
    pub loading: DVector<f64>,
    /// Noise variance `r`.
    pub variance: f64,
}

/// Linear-Gaussian state-space system shared read-only by both posterior paths.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpaceSystem {
    /// Transition matrix `G`.
    pub transition: DMatrix<f64>,
    /// Process-noise covariance `Q`.
    pub process_covariance: DMatrix<f64>,
    /// Observation channels assimilated at every step `t >= 1`.
    pub channels: Vec<ObservationChannel>,
    /// Prior mean of `x_0`.
    pub initial_mean: DVector<f64>,
    /// Prior covariance of `x_0`.
    pub initial_covariance: DMatrix<f64>,
}

/// Per-time-step posterior moments for `t = 0..=T`.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorMoments {
    /// Posterior means.
    pub means: Vec<DVector<f64>>,
    /// Posterior covariances.
    pub covariances: Vec<DMatrix<f64>>,
}

impl StateSpaceSystem {
    /// The fixed two-dimensional, two-channel toy system.
    pub fn toy() -> Self {
        Self {
            transition: DMatrix::from_row_slice(2, 2, &[0.9, 0.1, 0.0, 0.8]),
            process_covariance: DMatrix::from_row_slice(2, 2, &[0.15, 0.02, 0.02, 0.1]),
            channels: vec![
                ObservationChannel {
                    loading: DVector::from_vec(vec![1.0, -0.3]),
                    variance: 0.3,
                },
                ObservationChannel {
                    loading: DVector::from_vec(vec![0.2, 1.1]),
                    variance: 0.45,
                },
            ],
            initial_mean: DVector::from_vec(vec![0.4, -0.2]),
            initial_covariance: DMatrix::from_row_slice(2, 2, &[0.7, 0.1, 0.1, 0.6]),
        }
    }

    /// Latent dimension `d`.
    pub fn state_dim(&self) -> usize {
        self.initial_mean.len()
    }

    /// Simulates `horizon` steps and returns one observation vector per step
    /// `t = 1..=horizon`, one entry per channel.
    pub fn simulate(
        &self,
        rng: &mut RngHandle,
        horizon: usize,
    ) -> Result<Vec<DVector<f64>>, NdlmError> {
        let d = self.state_dim();
        let zero = DVector::zeros(d);
        let mut states = Vec::with_capacity(horizon + 1);
        states.push(sample_mvn(rng, &self.initial_mean, &self.initial_covariance)?);
        for t in 1..=horizon {
            let noise = sample_mvn(rng, &zero, &self.process_covariance)?;
            let next = &self.transition * &states[t - 1] + noise;
            states.push(next);
        }

        let observations = states[1..]
            .iter()
            .map(|x| {
                DVector::from_iterator(
                    self.channels.len(),
                    self.channels
                        .iter()
                        .map(|ch| ch.loading.dot(x) + rng.normal(0.0, ch.variance.sqrt())),
                )
            })
            .collect();
        Ok(observations)
    }
}
