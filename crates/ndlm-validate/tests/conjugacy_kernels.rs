use nalgebra::DMatrix;
use ndlm_core::RngHandle;
use ndlm_validate::checks::conjugacy_ig::{
    log_gaussian_variance_likelihood, log_ig_kernel, posterior_params, variance_grid, GRID_POINTS,
};
use ndlm_validate::checks::conjugacy_iw::{kernel_offset, log_iw_kernel};
use ndlm_validate::checks::{conjugacy_ig, conjugacy_iw, offset_spread};
use ndlm_validate::Diagnostics;

#[test]
fn ig_posterior_absorbs_half_counts() {
    let (a1, b1) = posterior_params(2.5, 1.2, 8, 3.0);
    assert_eq!(a1, 6.5);
    assert!((b1 - 2.7).abs() < 1e-15);
}

#[test]
fn ig_offset_is_constant_on_grid() {
    let (a0, b0, n, sse) = (3.0, 0.8, 17, 11.4);
    let (a1, b1) = posterior_params(a0, b0, n, sse);
    let grid = variance_grid();
    assert_eq!(grid.len(), GRID_POINTS);
    assert!((grid[0] - (-3.0f64).exp()).abs() < 1e-15);
    assert!((grid[GRID_POINTS - 1] - 3.0f64.exp()).abs() < 1e-12);
    let diffs: Vec<f64> = grid
        .iter()
        .map(|&s2| {
            log_ig_kernel(s2, a0, b0) + log_gaussian_variance_likelihood(s2, n, sse)
                - log_ig_kernel(s2, a1, b1)
        })
        .collect();
    assert!(offset_spread(&diffs) < 1e-10);
}

#[test]
fn wrong_ig_posterior_is_detected() {
    let (a0, b0, n, sse) = (3.0, 0.8, 17, 11.4);
    let (a1, b1) = posterior_params(a0, b0, n, sse);
    let diffs: Vec<f64> = variance_grid()
        .iter()
        .map(|&s2| {
            log_ig_kernel(s2, a0, b0) + log_gaussian_variance_likelihood(s2, n, sse)
                - log_ig_kernel(s2, a1 + 0.5, b1)
        })
        .collect();
    assert!(offset_spread(&diffs) > 1e-3);
}

#[test]
fn offset_spread_edge_cases() {
    assert_eq!(offset_spread(&[]), 0.0);
    assert_eq!(offset_spread(&[4.2, 4.2, 4.2]), 0.0);
    assert!((offset_spread(&[1.0, 3.0]) - 1.0).abs() < 1e-15);
    assert_eq!(offset_spread(&[1.0, f64::NAN]), f64::INFINITY);
    assert_eq!(offset_spread(&[f64::NEG_INFINITY, 0.0]), f64::INFINITY);
}

#[test]
fn iw_kernel_is_undefined_off_the_spd_cone() {
    let scale = DMatrix::<f64>::identity(2, 2);
    let indefinite = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
    assert_eq!(log_iw_kernel(&indefinite, 5.0, &scale), f64::NEG_INFINITY);
    let offset = kernel_offset(&indefinite, (5.0, &scale), 3, &scale, (8.0, &scale));
    assert!(offset.is_nan());
    assert_eq!(offset_spread(&[0.3, offset]), f64::INFINITY);
}

#[test]
fn iw_kernel_matches_identity_closed_form() {
    let scale = DMatrix::<f64>::identity(3, 3) * 2.0;
    let w = DMatrix::<f64>::identity(3, 3);
    // ln|I| = 0 and tr(2I) = 6.
    assert!((log_iw_kernel(&w, 7.0, &scale) + 3.0).abs() < 1e-14);
}

#[test]
fn ig_checker_passes_for_several_seeds() {
    for seed in [1u64, 7, 12345] {
        let mut rng = RngHandle::from_seed(seed);
        let result = conjugacy_ig::run(&mut rng, 20);
        assert!(result.passed(), "seed {seed}: {}", result.details());
        match result.diagnostics() {
            Diagnostics::InverseGamma(diag) => {
                assert_eq!(diag.grid_points, GRID_POINTS);
                assert!(diag.worst_case.is_some());
            }
            other => panic!("unexpected diagnostics {other:?}"),
        }
    }
}

#[test]
fn iw_checker_passes_for_several_seeds() {
    for seed in [3u64, 99, 12345] {
        let mut rng = RngHandle::from_seed(seed);
        let result = conjugacy_iw::run(&mut rng, 8, 30);
        assert!(result.passed(), "seed {seed}: {}", result.details());
        match result.diagnostics() {
            Diagnostics::InverseWishart(diag) => {
                assert_eq!(diag.evaluation_samples, 30);
                assert_eq!(diag.degenerate_points, 0);
                assert!(diag.max_std_of_kernel_difference < conjugacy_iw::TOLERANCE);
            }
            other => panic!("unexpected diagnostics {other:?}"),
        }
    }
}
