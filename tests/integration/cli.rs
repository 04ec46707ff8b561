//! Integration tests for the `taskboard` binary's startup path.
//!
//! These tests validate:
//! - A config error is reported once on stderr and exits with status 1

use std::process::Command;

#[test]
fn missing_config_file_is_reported_once() {
    let output = Command::new(env!("CARGO_BIN_EXE_taskboard"))
        .args(["--config", "/nonexistent/taskboard/config.toml"])
        .env_remove("TASKBOARD_API_URL")
        .output()
        .expect("failed to run taskboard");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 1, "unexpected stderr: {stderr}");
    assert!(lines[0].starts_with("taskboard: failed to read config file"));
}
