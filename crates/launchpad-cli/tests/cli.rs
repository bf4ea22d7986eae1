//! End-to-end tests for the `run-pipeline` and `run-checks` binaries.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Configuration pointing every tool at executables that cannot exist.
const MISSING_TOOLS_CONFIG: &str = r#"
[[tools]]
id = "java"
program = "launchpad-test-missing-java"
version_args = ["-version"]
label = "Java"
version_stream = "stderr"

[build]
program = "launchpad-test-missing-mvn"
"#;

fn project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("launchpad.toml"), config).unwrap();
    dir
}

fn cmd(bin: &str, root: &Path) -> Command {
    let mut cmd = Command::cargo_bin(bin).unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--project-root")
        .arg(root);
    cmd
}

#[test]
fn test_run_pipeline_help() {
    Command::cargo_bin("run-pipeline")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--project-root"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_run_checks_help_lists_report_flag() {
    Command::cargo_bin("run-checks")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--report"));
}

#[test]
fn test_run_pipeline_missing_tool_prints_remediation() {
    let project = project_with_config(MISSING_TOOLS_CONFIG);

    cmd("run-pipeline", project.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[1/2] Checking Java installation..."))
        .stdout(predicate::str::contains("[ERROR] Java is not installed or not in PATH"))
        .stdout(predicate::str::contains("Please install Java:"))
        .stdout(predicate::str::contains("Compiling").not());
}

#[test]
fn test_run_checks_on_empty_project_fails_and_writes_report() {
    let project = project_with_config(MISSING_TOOLS_CONFIG);
    let report_path = project.path().join("report.json");

    cmd("run-checks", project.path())
        .arg("--report")
        .arg(&report_path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL: Missing required files"))
        .stdout(predicate::str::contains("WARN: Data directory will be created on first run"))
        .stdout(predicate::str::contains("HAS SIGNIFICANT ISSUES"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["total_count"], 8);
    assert_eq!(report["passed_count"], 1);
    assert_eq!(report["verdict"], "not_ready");
    assert_eq!(report["outcomes"][0]["id"], "project_structure");
}

#[test]
fn test_invalid_config_is_unexpected_error() {
    let project = project_with_config("[checks]\npass_threshold = 1.5\n");

    cmd("run-checks", project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unexpected error:"))
        .stderr(predicate::str::contains("pass_threshold"));
}

#[test]
fn test_explicit_config_path_is_used() {
    let project = TempDir::new().unwrap();
    let config_path = project.path().join("custom.toml");
    fs::write(&config_path, MISSING_TOOLS_CONFIG).unwrap();

    cmd("run-pipeline", project.path())
        .arg("--config")
        .arg(&config_path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERROR] Java is not installed or not in PATH"));
}
