use nalgebra::{DMatrix, DVector};
use ndlm_core::RngHandle;
use ndlm_validate::checks::replicate::{self, aggregated_update, sequential_update};
use ndlm_validate::linalg::{max_abs_diff, max_abs_diff_vec};
use ndlm_validate::Diagnostics;

fn prior() -> (DVector<f64>, DMatrix<f64>, DVector<f64>) {
    let mean = DVector::from_vec(vec![0.2, -0.4, 1.0]);
    let cov = DMatrix::from_row_slice(3, 3, &[1.2, 0.3, 0.1, 0.3, 0.9, -0.2, 0.1, -0.2, 0.7]);
    let loading = DVector::from_vec(vec![1.0, 0.5, -0.3]);
    (mean, cov, loading)
}

#[test]
fn equal_variance_replicates_aggregate_exactly() {
    let (mean, cov, loading) = prior();
    let replicates = [0.3, 0.8, -0.1, 0.45];
    let (m_seq, c_seq) = sequential_update(&mean, &cov, &loading, 0.6, &replicates);
    let (m_agg, c_agg) = aggregated_update(&mean, &cov, &loading, 0.6, &replicates);
    assert!(max_abs_diff_vec(&m_seq, &m_agg) < 1e-12);
    assert!(max_abs_diff(&c_seq, &c_agg) < 1e-12);
}

#[test]
fn posterior_variance_shrinks_along_loading() {
    let (mean, cov, loading) = prior();
    let (_, c_post) = aggregated_update(&mean, &cov, &loading, 0.6, &[0.1, 0.2]);
    let before = loading.dot(&(&cov * &loading));
    let after = loading.dot(&(&c_post * &loading));
    assert!(after < before);
    assert_eq!(c_post, c_post.transpose());
}

#[test]
fn checker_passes_with_fixed_seed() {
    let mut rng = RngHandle::from_seed(12345);
    let result = replicate::run(&mut rng, 25);
    assert!(result.passed(), "{}", result.details());
    match result.diagnostics() {
        Diagnostics::Replicate(diag) => {
            let worst = diag.worst_case.as_ref().expect("worst case recorded");
            assert!((2..10).contains(&worst.replicates));
            assert!(worst.noise_variance > 0.0);
        }
        other => panic!("unexpected diagnostics {other:?}"),
    }
}
