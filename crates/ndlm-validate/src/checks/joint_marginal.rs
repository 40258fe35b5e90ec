use ndlm_core::RngHandle;

use crate::checker::CheckerId;
use crate::density::normal_pdf;
use crate::diagnostics::{Diagnostics, JointMarginalDiagnostics, MarginalCase};
use crate::linalg::max_error;
use crate::quadrature::{integrate_real_line, QuadratureOpts};
use crate::result::ValidationResult;

/// Maximum tolerated relative error between both marginal densities.
pub const TOLERANCE: f64 = 1e-9;

/// Closed-form marginal density of `y` under `x ~ N(m, c)`, `y | x ~ N(h x, r)`.
pub fn closed_form_marginal(y: f64, m: f64, c: f64, h: f64, r: f64) -> f64 {
    normal_pdf(y, h * m, h * h * c + r)
}

/// Marginal density of `y` obtained by integrating `p(y | x) p(x)` over `x`.
pub fn integrated_marginal(
    y: f64,
    m: f64,
    c: f64,
    h: f64,
    r: f64,
    quad: &QuadratureOpts,
) -> (f64, bool) {
    let outcome = integrate_real_line(|x| normal_pdf(y, h * x, r) * normal_pdf(x, m, c), quad);
    (outcome.value, outcome.converged)
}

/// Compares both marginal computations for `n_cases` random linear-Gaussian pairs.
pub fn run(rng: &mut RngHandle, n_cases: usize) -> ValidationResult {
    run_with(rng, n_cases, &QuadratureOpts::default())
}

/// As [`run`], with explicit quadrature settings.
pub fn run_with(rng: &mut RngHandle, n_cases: usize, quad: &QuadratureOpts) -> ValidationResult {
    let mut max_relative_error = 0.0;
    let mut cases = Vec::with_capacity(n_cases);
    let mut worst_case: Option<MarginalCase> = None;

    for _ in 0..n_cases {
        let m = rng.normal(0.0, 1.2);
        let c = rng.log_normal(-0.3, 0.4);
        let h = rng.normal(1.0, 0.3);
        let r = rng.log_normal(-0.4, 0.3);
        let y = rng.standard_normal();

        let (numerical, converged) = integrated_marginal(y, m, c, h, r, quad);
        let closed_form = closed_form_marginal(y, m, c, h, r);
        let relative_error = (numerical - closed_form).abs() / closed_form.abs().max(1e-12);

        let case = MarginalCase {
            m,
            c,
            h,
            r,
            y,
            numerical,
            closed_form,
            relative_error,
            converged,
        };
        if worst_case.is_none() || relative_error > max_relative_error || relative_error.is_nan() {
            worst_case = Some(case.clone());
        }
        max_relative_error = max_error(max_relative_error, relative_error);
        cases.push(case);
    }

    let passed = max_relative_error < TOLERANCE;
    ValidationResult::from_verdict(
        CheckerId::JointMarginal,
        passed,
        Diagnostics::JointMarginal(JointMarginalDiagnostics {
            max_relative_error,
            tolerance: TOLERANCE,
            cases,
            worst_case,
        }),
    )
}
