//! End-to-end tests driving the `scorecard` binary
//!
//! Every test runs against its own temporary JSON store.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

// ============== Harness ==============

/// Wrapper around the scorecard binary
pub struct ScorecardCli {
    binary: PathBuf,
    storage: Option<PathBuf>,
    user: Option<String>,
    output_format: Option<String>,
}

pub struct CliResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ScorecardCli {
    pub fn new(binary: PathBuf) -> Self {
        Self {
            binary,
            storage: None,
            user: None,
            output_format: None,
        }
    }

    pub fn with_storage(mut self, storage: PathBuf) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn with_output_format(mut self, format: &str) -> Self {
        self.output_format = Some(format.to_string());
        self
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        let mut cmd = Command::new(&self.binary);

        if let Some(storage) = &self.storage {
            cmd.arg("--storage").arg(storage);
        }
        if let Some(user) = &self.user {
            cmd.arg("--user").arg(user);
        }
        if let Some(format) = &self.output_format {
            cmd.arg("--output").arg(format);
        }
        // keep the environment from leaking into results
        for var in ["SCORECARD_USER", "SCORECARD_STORAGE", "SCORECARD_DB_PATH", "SCORECARD_SEED"] {
            cmd.env_remove(var);
        }

        let output = cmd
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .expect("failed to run scorecard binary");

        CliResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let result = self.run(args);
        assert!(result.success, "command {:?} failed: {}", args, result.stderr);
        serde_json::from_str(&result.stdout).expect("stdout is not JSON")
    }
}

/// CLI with JSON output over a fresh temporary store
fn create_test_cli() -> (ScorecardCli, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let cli = ScorecardCli::new(PathBuf::from(env!("CARGO_BIN_EXE_scorecard")))
        .with_storage(temp_dir.path().join("storage"))
        .with_output_format("json");
    (cli, temp_dir)
}

const FAIR_SIGNALS: [&str; 7] = [
    "scan",
    "--password-score",
    "72",
    "--breach-count",
    "2",
    "--two-fa",
    "false",
];

// ============== Tests ==============

#[test]
fn test_scan_persists_score_and_tasks() {
    let (cli, _dir) = create_test_cli();

    let report = cli.run_json(&FAIR_SIGNALS);
    assert_eq!(report["scan"]["score"]["value"], 47);
    assert_eq!(report["scan"]["score"]["label"], "Fair");
    assert_eq!(report["todos"].as_array().map(Vec::len), Some(5));

    let latest = cli.run_json(&["latest"]);
    assert_eq!(latest["id"], report["scan"]["id"]);
}

#[test]
fn test_score_persists_nothing() {
    let (cli, _dir) = create_test_cli();

    let assessment = cli.run_json(&[
        "score",
        "--password-score",
        "100",
        "--breach-count",
        "0",
        "--two-fa",
        "true",
    ]);
    assert_eq!(assessment["score"]["value"], 100);
    assert_eq!(assessment["tasks"].as_array().map(Vec::len), Some(2));

    assert!(cli.run_json(&["latest"]).is_null());
    assert_eq!(cli.run_json(&["todos", "list"]), serde_json::json!([]));
}

#[test]
fn test_invalid_signals_fail() {
    let (cli, _dir) = create_test_cli();

    let result = cli.run(&[
        "score",
        "--password-score",
        "50",
        "--breach-count",
        "-1",
        "--two-fa",
        "true",
    ]);
    assert!(!result.success);
    assert!(result.stderr.contains("Error:"));
}

#[test]
fn test_repeated_scans_append_history() {
    let (cli, _dir) = create_test_cli();

    cli.run_json(&FAIR_SIGNALS);
    cli.run_json(&FAIR_SIGNALS);

    let history = cli.run_json(&["history"]);
    assert_eq!(history.as_array().map(Vec::len), Some(2));
    let todos = cli.run_json(&["todos", "list"]);
    assert_eq!(todos.as_array().map(Vec::len), Some(10));
}

#[test]
fn test_todo_lifecycle() {
    let (cli, _dir) = create_test_cli();

    let added = cli.run_json(&["todos", "add", "Freeze credit", "--priority", "high"]);
    let id = added["id"].as_str().expect("todo id").to_string();
    assert_eq!(added["completed"], false);

    let done = cli.run_json(&["todos", "done", &id]);
    assert_eq!(done["completed"], true);
    let toggled = cli.run_json(&["todos", "toggle", &id]);
    assert_eq!(toggled["completed"], false);

    let missing = cli.run(&["todos", "done", "01ARZ3NDEKTSV4RRFFQ69G5FAV"]);
    assert!(!missing.success);
}

#[test]
fn test_users_are_isolated() {
    let (cli, dir) = create_test_cli();
    cli.run_json(&FAIR_SIGNALS);

    let other = ScorecardCli::new(PathBuf::from(env!("CARGO_BIN_EXE_scorecard")))
        .with_storage(dir.path().join("storage"))
        .with_user("someone-else")
        .with_output_format("json");
    assert!(other.run_json(&["latest"]).is_null());
}

#[test]
fn test_breach_check_requires_email() {
    let (cli, _dir) = create_test_cli();

    assert!(!cli.run(&["breach-check", "nope"]).success);

    let report = cli.run_json(&["breach-check", "user@example.com"]);
    assert_eq!(report["email"], "user@example.com");
    assert!(report["breachCount"].as_u64().is_some_and(|n| n < 3));
}

#[test]
fn test_minimal_output() {
    let (cli, _dir) = create_test_cli();
    let cli = cli.with_output_format("minimal");

    let result = cli.run(&[
        "score",
        "--password-score",
        "72",
        "--breach-count",
        "2",
        "--two-fa",
        "false",
    ]);
    assert!(result.success);
    assert_eq!(result.stdout.trim(), "47 Fair");
}

#[test]
fn test_twofa_enabled_reports_protected_services() {
    let (cli, _dir) = create_test_cli();

    let coverage = cli.run_json(&["twofa", "--enabled", "true"]);
    assert_eq!(coverage["status"], "Partial");
    let services = coverage["enabled_services"].as_u64().expect("service count");
    assert!((2..=5).contains(&services));

    let disabled = cli.run_json(&["twofa", "--enabled", "false"]);
    assert_eq!(disabled["status"], "NeedsSetup");
    assert_eq!(disabled["enabled_services"], 1);

    assert!(!cli.run(&["twofa", "--enabled", "true", "--services", "0"]).success);
}
