//! Integration test: run the `quantum-matrix` binary end to end.
#![cfg(feature = "dashboard")]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn quantum_matrix() -> Command {
    let mut cmd = Command::cargo_bin("quantum-matrix").expect("binary built");
    cmd.env_remove("RUST_LOG").env_remove("QTM_LOG_LEVEL").env_remove("QTM_SEED");
    cmd
}

#[test]
fn missing_config_warns_and_uses_defaults() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    quantum_matrix()
        .arg("--config")
        .arg(&missing)
        .args(["snapshot", "--ticks", "0", "--seed", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains("\"EUR/USD\""));
}

#[test]
fn snapshot_output_is_json_only() {
    let dir = tempdir().unwrap();
    let output = quantum_matrix()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .args(["snapshot", "--ticks", "3", "--seed", "7"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strategies"]["topPerformers"].as_array().unwrap().len(), 5);
}

#[test]
fn init_takes_config_after_subcommand() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.toml");

    quantum_matrix().arg("init").arg("--config").arg(&path).assert().success();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[refresh]"));
    assert!(written.contains("snapshot_interval_ms = 2000"));

    quantum_matrix()
        .arg("init")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    quantum_matrix().args(["init", "--force", "--config"]).arg(&path).assert().success();
}
