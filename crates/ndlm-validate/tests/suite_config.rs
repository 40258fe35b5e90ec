use ndlm_core::NdlmError;
use ndlm_validate::config::{MAX_HORIZON, MAX_TRIALS};
use ndlm_validate::SuiteConfig;

fn config_code(err: NdlmError) -> String {
    match err {
        NdlmError::Config(info) => info.code,
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn empty_yaml_yields_reference_config() {
    let config: SuiteConfig = serde_yaml::from_str("{}").expect("parse");
    assert_eq!(config, SuiteConfig::default());
    assert_eq!(config.seed, 20_260_207);
    assert_eq!(config.kalman_horizon, 4);
    assert_eq!(config.trials.inverse_gamma, 20);
    assert_eq!(config.quadrature.limit, 200);
    config.validate().expect("default config is valid");
}

#[test]
fn partial_yaml_overrides_only_named_fields() {
    let yaml = "seed: 7\ntrials:\n  gradient: 5\nquadrature:\n  epsabs: 1.0e-10\n";
    let config: SuiteConfig = serde_yaml::from_str(yaml).expect("parse");
    assert_eq!(config.seed, 7);
    assert_eq!(config.trials.gradient, 5);
    assert_eq!(config.trials.replicate, 25);
    assert_eq!(config.quadrature.epsabs, 1e-10);
    assert_eq!(config.quadrature.epsrel, 1e-13);
}

#[test]
fn zero_trials_are_rejected() {
    let mut config = SuiteConfig::default();
    config.trials.kalman = 0;
    let err = config.validate().expect_err("zero trials");
    assert_eq!(config_code(err), "zero-trials");
}

#[test]
fn oversized_trials_are_rejected_with_field_context() {
    let mut config = SuiteConfig::default();
    config.trials.iw_evaluation_samples = MAX_TRIALS + 1;
    match config.validate().expect_err("too many trials") {
        NdlmError::Config(info) => {
            assert_eq!(info.code, "too-many-trials");
            assert_eq!(info.context.get("field").map(String::as_str), Some("iw_evaluation_samples"));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn horizon_bounds_are_enforced() {
    let mut config = SuiteConfig::default();
    config.kalman_horizon = 0;
    assert_eq!(config_code(config.validate().expect_err("zero")), "invalid-horizon");
    config.kalman_horizon = MAX_HORIZON + 1;
    assert_eq!(config_code(config.validate().expect_err("long")), "invalid-horizon");
    config.kalman_horizon = MAX_HORIZON;
    config.validate().expect("max horizon allowed");
}

#[test]
fn quadrature_settings_are_checked() {
    let mut config = SuiteConfig::default();
    config.quadrature.epsrel = 0.0;
    assert_eq!(
        config_code(config.validate().expect_err("tolerance")),
        "invalid-quadrature-tolerance"
    );
    let mut config = SuiteConfig::default();
    config.quadrature.epsabs = f64::NAN;
    assert_eq!(
        config_code(config.validate().expect_err("nan tolerance")),
        "invalid-quadrature-tolerance"
    );
    let mut config = SuiteConfig::default();
    config.quadrature.initial_segments = 0;
    assert_eq!(
        config_code(config.validate().expect_err("segments")),
        "invalid-quadrature-limit"
    );
}
