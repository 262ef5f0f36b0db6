//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config file and verify
//! outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

const DEFAULT_CONFIG: &str = "[timer]\nfocus_minutes = 25\n";

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

/// Run a CLI command with optional stdin and return (stdout, stderr, code).
fn run_cli(config: &Path, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_foco-cli"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("Failed to write stdin");
        }
    }

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[timer]\nfocus_minutes = 40\n");
    let (stdout, _, code) = run_cli(&config, &["config", "get", "timer.focus_minutes"], None);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "40");
}

#[test]
fn test_config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (_, stderr, code) = run_cli(&config, &["config", "get", "timer.nope"], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key: timer.nope"));
}

#[test]
fn test_config_list() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (stdout, _, code) = run_cli(&config, &["config", "list"], None);
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["timer"]["focus_minutes"], 25);
    assert_eq!(parsed["controls"]["notifications_muted"], true);
}

#[test]
fn test_config_path_echoes_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (stdout, _, code) = run_cli(&config, &["config", "path"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), config.display().to_string());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[timer]\nfocus_minutes = 500\n");
    let (_, stderr, code) = run_cli(&config, &["config", "list"], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("timer.focus_minutes"));
}

#[test]
fn test_cycle_completes_one_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (stdout, stderr, code) = run_cli(
        &config,
        &["cycle", "--focus-minutes", "1", "--sessions", "1", "--tick-ms", "1"],
        None,
    );
    assert_eq!(code, 0, "Cycle failed: {stderr}");

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["type"], "timer_started");
    let sessions = events
        .iter()
        .filter(|e| e["type"] == "session_completed")
        .count();
    assert_eq!(sessions, 1);
    assert_eq!(events.last().unwrap()["type"], "session_completed");
    assert!(stderr.contains("You completed 1 focus session"));
}

#[test]
fn test_cycle_runs_through_break() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (stdout, _, code) = run_cli(
        &config,
        &["cycle", "--focus-minutes", "1", "--sessions", "2", "--tick-ms", "1"],
        None,
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.matches("\"session_completed\"").count(), 2);
    assert_eq!(stdout.matches("\"break_completed\"").count(), 1);
}

#[test]
fn test_cycle_rejects_out_of_range_focus() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (_, _, code) = run_cli(&config, &["cycle", "--focus-minutes", "0"], None);
    assert_ne!(code, 0);
}

#[test]
fn test_run_manages_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (stdout, _, code) = run_cli(
        &config,
        &["run"],
        Some("add Write report\nadd   \ndone 1\nrm 5\nquit\n"),
    );
    assert_eq!(code, 0, "Run failed");
    assert!(stdout.contains("Added: Write report"));
    assert!(stdout.contains("error: 'task text' must not be empty"));
    assert!(stdout.contains("Today's tasks (1 of 1 done)"));
    assert!(stdout.contains("error: no task 5"));
}

#[test]
fn test_run_timer_controls() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (stdout, _, code) = run_cli(
        &config,
        &["run", "--focus-minutes", "10"],
        Some("focus 500\nfocus 30\nstatus\nstart\npause\nquit\n"),
    );
    assert_eq!(code, 0, "Run failed");
    assert!(stdout.contains("Focus 10:00"));
    assert!(stdout.contains("error: 'focus_minutes' must be between 1 and 120, got 500"));
    assert!(stdout.contains("Focus length set to 30 minutes."));
    assert!(stdout.contains("Focus 30:00"));
}

#[test]
fn test_run_exits_on_eof() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), DEFAULT_CONFIG);
    let (stdout, _, code) = run_cli(&config, &["run"], Some("theme\n"));
    assert_eq!(code, 0);
    assert!(stdout.contains("Theme: dark"));
}
