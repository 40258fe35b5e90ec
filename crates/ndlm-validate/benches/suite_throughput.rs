use criterion::{criterion_group, criterion_main, Criterion};
use ndlm_core::RngHandle;
use ndlm_validate::checks::kalman;
use ndlm_validate::density::normal_pdf;
use ndlm_validate::{integrate_real_line, run_suite, QuadratureOpts, SuiteConfig};

fn bench_suite(c: &mut Criterion) {
    let config = SuiteConfig::default();
    c.bench_function("suite_throughput", |b| {
        b.iter(|| {
            let report = run_suite(&config).expect("suite");
            assert!(report.summary.all_passed);
        });
    });
}

fn bench_quadrature(c: &mut Criterion) {
    let opts = QuadratureOpts::default();
    c.bench_function("quadrature_narrow_gaussian", |b| {
        b.iter(|| integrate_real_line(|x| normal_pdf(x, 3.0, 0.05), &opts).value);
    });
}

fn bench_kalman_long_horizon(c: &mut Criterion) {
    c.bench_function("kalman_horizon_25", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(7);
            kalman::run(&mut rng, 1, 25).passed()
        });
    });
}

criterion_group!(benches, bench_suite, bench_quadrature, bench_kalman_long_horizon);
criterion_main!(benches);
