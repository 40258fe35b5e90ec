use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use ndlm_validate::CheckerId;
use serde_json::Value;
use tempfile::tempdir;

fn ndlm_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ndlm-sim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn ndlm-sim")
}

fn validate_into(dir: &Path, extra: &[&str]) -> (Output, PathBuf, PathBuf) {
    let json = dir.join("out/validation.json");
    let md = dir.join("out/validation.md");
    let mut args = vec![
        "validate",
        "--json-output",
        json.to_str().expect("utf8 path"),
        "--md-output",
        md.to_str().expect("utf8 path"),
    ];
    args.extend_from_slice(extra);
    let output = ndlm_sim(&args);
    (output, json, md)
}

#[test]
fn validate_writes_both_reports() {
    let dir = tempdir().expect("tempdir");
    let (output, json_path, md_path) = validate_into(dir.path(), &["--seed", "12345"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation summary: total=7 passed=7 failed=0"));

    let report: Value = serde_json::from_slice(&fs::read(&json_path).expect("json")).expect("parse");
    assert_eq!(report["seed"], 12345);
    assert_eq!(report["summary"]["all_passed"], true);
    let results = report["results"].as_array().expect("results array");
    assert_eq!(results.len(), CheckerId::ALL.len());
    for (result, id) in results.iter().zip(CheckerId::ALL) {
        assert_eq!(result["name"], id.name());
        assert_eq!(result["passed"], true);
    }

    let markdown = fs::read_to_string(&md_path).expect("markdown");
    assert!(markdown.starts_with("# Validation Results"));
    assert!(markdown.contains("- PASS: 7"));
    assert!(markdown.contains("- kalman_ffbs_vs_bruteforce: PASS"));
}

#[test]
fn same_seed_reproduces_the_json_report() {
    let first = tempdir().expect("tempdir");
    let second = tempdir().expect("tempdir");
    let (a, json_a, _) = validate_into(first.path(), &["--seed", "77"]);
    let (b, json_b, _) = validate_into(second.path(), &["--seed", "77"]);
    assert!(a.status.success() && b.status.success());
    assert_eq!(fs::read(json_a).expect("a"), fs::read(json_b).expect("b"));
}

#[test]
fn yaml_config_is_applied() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("suite.yaml");
    fs::write(&config, "seed: 9\nkalman_horizon: 6\ntrials:\n  kalman: 2\n").expect("config");
    let (output, json_path, _) =
        validate_into(dir.path(), &["--config", config.to_str().expect("utf8 path")]);
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&fs::read(json_path).expect("json")).expect("parse");
    assert_eq!(report["seed"], 9);
    let kalman = &report["results"][5]["diagnostics"];
    assert_eq!(kalman["horizon"], 6);
    assert_eq!(kalman["runs"], 2);
}

#[test]
fn invalid_config_exits_non_zero() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "kalman_horizon: 0\n").expect("config");
    let (output, json_path, _) =
        validate_into(dir.path(), &["--config", config.to_str().expect("utf8 path")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid-horizon"));
    assert!(!json_path.exists());
}

#[test]
fn list_prints_checkers_in_suite_order() {
    let output = ndlm_sim(&["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut last = 0;
    for id in CheckerId::ALL {
        let pos = stdout.find(id.name()).expect("checker listed");
        assert!(pos >= last);
        last = pos;
        assert!(stdout.contains(id.equation_refs()));
    }
}
