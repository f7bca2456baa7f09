//! CLI Integration Tests for Planner
//!
//! Runs the built `planner-server` binary for the init and config commands.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run planner-server with arguments inside `working_dir`
fn run_planner(args: &[&str], working_dir: &Path, secret: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_planner-server"));
    cmd.args(args)
        .current_dir(working_dir)
        .env_remove("PLANNER_CONFIG")
        .env_remove("SECRET_KEY")
        .env("NO_COLOR", "1");

    if let Some(secret) = secret {
        cmd.env("SECRET_KEY", secret);
    }

    cmd.output().expect("Failed to execute command")
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_planner(&["--help"], temp_dir.path(), None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Planner"));
    assert!(stdout.contains("init"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_version_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_planner(&["--version"], temp_dir.path(), None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("planner-server"));
}

// =============================================================================
// Init Command Tests
// =============================================================================

#[test]
fn test_init_creates_planner_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run_planner(&["--no-color", "init"], temp_dir.path(), None);

    assert!(output.status.success(), "Init command failed: {:?}", output);
    let content = fs::read_to_string(temp_dir.path().join("planner.toml"))
        .expect("Failed to read planner.toml");
    assert!(content.contains("[server]"));
    assert!(content.contains("[auth]"));
    assert!(content.contains("[database]"));

    let env_example = fs::read_to_string(temp_dir.path().join(".env.example"))
        .expect("Failed to read .env.example");
    assert!(env_example.contains("SECRET_KEY"));
}

#[test]
fn test_init_twice_keeps_existing_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    run_planner(&["init", "--port", "4100"], temp_dir.path(), None);

    let output = run_planner(&["init", "--port", "4200"], temp_dir.path(), None);

    assert!(output.status.success());
    let content = fs::read_to_string(temp_dir.path().join("planner.toml")).unwrap();
    assert!(content.contains("port = 4100"));
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_never_prints_secret() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    run_planner(&["init"], temp_dir.path(), None);

    let output = run_planner(
        &["--no-color", "config"],
        temp_dir.path(),
        Some("super-secret-value"),
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SECRET_KEY"));
    assert!(!stdout.contains("super-secret-value"));
}

#[test]
fn test_config_validate_with_secret() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    run_planner(&["init"], temp_dir.path(), None);

    let output = run_planner(
        &["--no-color", "config", "--validate"],
        temp_dir.path(),
        Some("super-secret-value"),
    );

    assert!(output.status.success(), "validate failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
}

#[test]
fn test_config_validate_without_secret_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    run_planner(&["init"], temp_dir.path(), None);

    let output = run_planner(&["--no-color", "config", "--validate"], temp_dir.path(), None);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("NOT SET"));
}

#[test]
fn test_server_refuses_to_start_without_secret() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    run_planner(&["init"], temp_dir.path(), None);

    let output = run_planner(&[], temp_dir.path(), None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SECRET_KEY"), "stderr: {}", stderr);
}
