//! Binary smoke tests: stdout carries only results.

use std::path::PathBuf;
use std::process::Command;

fn spinlab() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_spinlab"));
    cmd.env_remove("SPINLAB_LOG_JSON")
        .env_remove("RUST_LOG")
        .args(["--config", "/nonexistent/spinlab.toml"]);
    cmd
}

fn temp_path() -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("spinlab_cli_{}.json", uuid::Uuid::new_v4()));
    p
}

#[test]
fn test_generate_writes_only_the_result_line_to_stdout() {
    let out = temp_path();
    let output = spinlab()
        .args(["generate", "--count", "3", "--seed", "1", "--out"])
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), format!("Wrote 3 spins to {}", out.display()));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Roulette progression simulator"));

    std::fs::remove_file(&out).ok();
}

#[test]
fn test_simulate_stdout_starts_with_first_table() {
    let output = spinlab()
        .args(["simulate", "--seed", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("== Net profit using No Strategy (1000 spins) =="));
    assert!(!stdout.contains("Roulette progression simulator"));
}
