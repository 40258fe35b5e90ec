use ndlm_core::RngHandle;
use ndlm_validate::checks::joint_marginal::{closed_form_marginal, integrated_marginal};
use ndlm_validate::checks::{joint_marginal, normalization};
use ndlm_validate::{CheckerId, Diagnostics, QuadratureOpts};

#[test]
fn normalization_checker_passes_and_records_every_case() {
    let mut rng = RngHandle::from_seed(12345);
    let result = normalization::run(&mut rng, 12);
    assert!(result.passed(), "{}", result.details());
    assert_eq!(result.name(), CheckerId::LikelihoodNormalization.name());
    match result.diagnostics() {
        Diagnostics::Normalization(diag) => {
            assert_eq!(diag.cases.len(), 12);
            assert!(diag.cases.iter().all(|c| c.variance > 0.0));
            let worst = diag.worst_case.as_ref().expect("worst case recorded");
            assert_eq!(worst.abs_error, diag.max_abs_error);
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
}

#[test]
fn starved_quadrature_fails_the_normalization_check() {
    let starved = QuadratureOpts {
        limit: 1,
        initial_segments: 1,
        ..QuadratureOpts::default()
    };
    let mut rng = RngHandle::from_seed(12345);
    let result = normalization::run_with(&mut rng, 12, &starved);
    assert!(!result.passed());
    assert!(result.details().contains("failed"), "{}", result.details());
}

#[test]
fn marginal_of_identity_observation_adds_variances() {
    let quad = QuadratureOpts::default();
    let (numerical, converged) = integrated_marginal(0.7, 0.2, 0.5, 1.0, 0.3, &quad);
    let closed = closed_form_marginal(0.7, 0.2, 0.5, 1.0, 0.3);
    assert!(converged);
    assert!(((numerical - closed) / closed).abs() < 1e-9);
    let expected = (-(0.5f64 * 0.5) / (2.0 * 0.8)).exp() / (2.0 * std::f64::consts::PI * 0.8).sqrt();
    assert!((closed - expected).abs() < 1e-15);
}

#[test]
fn joint_marginal_checker_passes() {
    let mut rng = RngHandle::from_seed(20_260_207);
    let result = joint_marginal::run(&mut rng, 10);
    assert!(result.passed(), "{}", result.details());
    match result.diagnostics() {
        Diagnostics::JointMarginal(diag) => {
            assert_eq!(diag.cases.len(), 10);
            assert!(diag.max_relative_error < joint_marginal::TOLERANCE);
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
}
