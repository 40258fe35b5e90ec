//! Sequential path: forward Kalman filter followed by the backward RTS pass.

use nalgebra::{DMatrix, DVector};
use ndlm_core::NdlmError;

use super::system::{PosteriorMoments, StateSpaceSystem};
use crate::linalg::{invert, symmetrize};

/// Forward-pass moments for `t = 0..=T`.
///
/// Index 0 holds the prior `(m0, C0)`; `a[0]` and `r[0]` are unused zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStore {
    /// One-step-ahead means `a_t = G m_{t-1}`.
    pub a: Vec<DVector<f64>>,
    /// One-step-ahead covariances `R_t = G C_{t-1} G^T + Q`.
    pub r: Vec<DMatrix<f64>>,
    /// Filtered means.
    pub m: Vec<DVector<f64>>,
    /// Filtered covariances.
    pub c: Vec<DMatrix<f64>>,
}

/// Assimilates one scalar observation in place.
///
/// `f = H C H^T + r`, `k = C H / f`, `m += k (y - H m)`, `C -= k H C`, then
/// `C` is re-symmetrized.
pub fn assimilate_scalar(
    mean: &mut DVector<f64>,
    cov: &mut DMatrix<f64>,
    loading: &DVector<f64>,
    variance: f64,
    y: f64,
) {
    let ch = &*cov * loading;
    let f = loading.dot(&ch) + variance;
    let gain = ch / f;
    let innovation = y - loading.dot(&*mean);
    *mean += &gain * innovation;
    let correction = &gain * (loading.transpose() * &*cov);
    *cov -= correction;
    symmetrize(cov);
}

/// Runs the predict/assimilate recursion over all observations.
pub fn forward_filter(system: &StateSpaceSystem, observations: &[DVector<f64>]) -> FilterStore {
    let d = system.state_dim();
    let g = &system.transition;
    let mut store = FilterStore {
        a: vec![DVector::zeros(d)],
        r: vec![DMatrix::zeros(d, d)],
        m: vec![system.initial_mean.clone()],
        c: vec![system.initial_covariance.clone()],
    };

    let mut m_prev = system.initial_mean.clone();
    let mut c_prev = system.initial_covariance.clone();
    for y in observations {
        let a_t = g * &m_prev;
        let r_t = g * &c_prev * g.transpose() + &system.process_covariance;

        let mut m_t = a_t.clone();
        let mut c_t = r_t.clone();
        for (channel, &value) in system.channels.iter().zip(y.iter()) {
            assimilate_scalar(&mut m_t, &mut c_t, &channel.loading, channel.variance, value);
        }

        store.a.push(a_t);
        store.r.push(r_t);
        store.m.push(m_t.clone());
        store.c.push(c_t.clone());
        m_prev = m_t;
        c_prev = c_t;
    }
    store
}

/// Backward Rauch-Tung-Striebel pass over a completed forward filter.
pub fn rts_smooth(
    system: &StateSpaceSystem,
    store: &FilterStore,
) -> Result<PosteriorMoments, NdlmError> {
    let horizon = store.m.len() - 1;
    let gt = system.transition.transpose();
    let mut means = store.m.clone();
    let mut covariances = store.c.clone();

    for t in (0..horizon).rev() {
        let r_next_inv = invert(&store.r[t + 1], "one-step-ahead covariance")?;
        let b_t = &store.c[t] * &gt * r_next_inv;
        let mean = &store.m[t] + &b_t * (&means[t + 1] - &store.a[t + 1]);
        let mut cov = &store.c[t] + &b_t * (&covariances[t + 1] - &store.r[t + 1]) * b_t.transpose();
        symmetrize(&mut cov);
        means[t] = mean;
        covariances[t] = cov;
    }

    Ok(PosteriorMoments { means, covariances })
}

/// Filter then smooth.
pub fn filter_smoother(
    system: &StateSpaceSystem,
    observations: &[DVector<f64>],
) -> Result<PosteriorMoments, NdlmError> {
    let store = forward_filter(system, observations);
    rts_smooth(system, &store)
}
