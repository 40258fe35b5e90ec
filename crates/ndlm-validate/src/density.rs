use std::f64::consts::PI;

/// Univariate normal density `N(x; mean, variance)`.
pub fn normal_pdf(x: f64, mean: f64, variance: f64) -> f64 {
    let z = x - mean;
    (-0.5 * z * z / variance).exp() / (2.0 * PI * variance).sqrt()
}
