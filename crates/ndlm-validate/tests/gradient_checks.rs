use ndlm_core::RngHandle;
use ndlm_validate::checks::gradient::{self, LambdaPosterior, STEP};
use ndlm_validate::Diagnostics;
use proptest::prelude::*;

fn posterior() -> LambdaPosterior {
    LambdaPosterior {
        regressor: vec![0.5, -1.2, 2.0, 0.3],
        observed: vec![0.4, -0.9, 1.7, 0.1],
        noise_variance: 0.8,
        prior_mean: 0.1,
        prior_variance: 1.5,
    }
}

#[test]
fn hessian_is_constant_and_negative() {
    let post = posterior();
    let info = 0.25 + 1.44 + 4.0 + 0.09;
    assert!((post.hessian() - (-info / 0.8 - 1.0 / 1.5)).abs() < 1e-12);
}

#[test]
fn gradient_vanishes_at_posterior_mode() {
    let post = posterior();
    let zy: f64 = post.regressor.iter().zip(&post.observed).map(|(z, y)| z * y).sum();
    let zz: f64 = post.regressor.iter().map(|z| z * z).sum();
    let precision = zz / post.noise_variance + 1.0 / post.prior_variance;
    let mode = (zy / post.noise_variance + post.prior_mean / post.prior_variance) / precision;
    assert!(post.gradient(mode).abs() < 1e-12);
}

#[test]
fn checker_passes_with_fixed_seed() {
    let mut rng = RngHandle::from_seed(12345);
    let result = gradient::run(&mut rng, 25);
    assert!(result.passed(), "{}", result.details());
    match result.diagnostics() {
        Diagnostics::GradientHessian(diag) => {
            assert_eq!(diag.step, STEP);
            let worst = diag.worst_case.as_ref().expect("worst case recorded");
            assert!((12..40).contains(&worst.t));
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
}

proptest! {
    #[test]
    fn finite_differences_track_closed_form(lambda in -2.0f64..2.0, shift in -1.0f64..1.0) {
        let mut post = posterior();
        post.prior_mean = shift;
        let (grad, hess) = post.finite_difference(lambda, STEP);
        prop_assert!((grad - post.gradient(lambda)).abs() < 1e-7);
        prop_assert!((hess - post.hessian()).abs() < 1e-4);
    }
}
