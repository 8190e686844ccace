//! Runs the `oraculo` binary against a fixture directory.

mod support;

use std::process::{Command, Output};

use support::{twenty_day_mrr, Fixture, ABC};

fn run_binary(fixture: &Fixture, rust_log: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_oraculo"));
    command.current_dir(fixture.path()).env_remove("RUST_LOG");
    if let Some(filter) = rust_log {
        command.env("RUST_LOG", filter);
    }
    command.output().unwrap()
}

#[test]
fn test_report_goes_to_stdout() {
    let fixture = Fixture::new();
    fixture.write_metrics(&ABC, &twenty_day_mrr(), 2.0);

    let output = run_binary(&fixture, None);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("R$ 1,000"), "{}", stdout);
    assert!(stdout.contains("+11.11%"), "{}", stdout);

    // default filter is info
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loaded model bundle"), "{}", stderr);
    assert!(!stderr.contains("raw prediction"), "{}", stderr);
}

#[test]
fn test_module_directive_enables_debug_output() {
    let fixture = Fixture::new();
    fixture.write_metrics(&ABC, &twenty_day_mrr(), 2.0);

    let output = run_binary(&fixture, Some("warn,oraculo::services=debug"));
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("raw prediction"), "{}", stderr);
    assert!(!stderr.contains("Loaded model bundle"), "{}", stderr);
}

#[test]
fn test_missing_artifact_fails_before_rendering() {
    let fixture = Fixture::new();
    fixture.write_metrics(&ABC, &twenty_day_mrr(), 2.0);
    std::fs::remove_file(fixture.path().join("scaler.json")).unwrap();

    let output = run_binary(&fixture, None);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load model artifacts"), "{}", stderr);
}
