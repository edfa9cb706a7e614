//! Robot-mode end-to-end tests.

use serde_json::Value;

use crate::common::cli::CliRunner;

fn parse_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| panic!("Failed to parse JSON:\n{text}"))
}

#[test]
fn robot_quick_start_outputs_json() {
    let cli = CliRunner::new();
    let output = cli.cmd().arg("--robot").output().unwrap();
    assert!(output.status.success());

    let json = parse_json(String::from_utf8_lossy(&output.stdout).trim());
    assert_eq!(json.get("tool").and_then(Value::as_str), Some("netsnap"));
    assert!(json.get("workflow").is_some());
    assert!(json.get("output_modes").is_some());
}

#[test]
fn robot_checks_lists_whole_registry() {
    let cli = CliRunner::new();
    let output = cli.cmd().args(["checks", "--robot"]).output().unwrap();
    assert!(output.status.success());

    let json = parse_json(String::from_utf8_lossy(&output.stdout).trim());
    let checks = json["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 18);
    assert_eq!(checks[0]["name"], "acl");
    assert_eq!(checks[0]["command"], "show ip access-lists");
}

#[test]
fn robot_version_outputs_json() {
    let cli = CliRunner::new();
    let output = cli
        .cmd()
        .args(["version", "--format=json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = parse_json(String::from_utf8_lossy(&output.stdout).trim());
    assert!(json.get("version").is_some());
}

#[test]
fn robot_snapshots_empty_store() {
    let cli = CliRunner::new();
    let output = cli.cmd().args(["snapshots", "--robot"]).output().unwrap();
    assert!(output.status.success());

    let json = parse_json(String::from_utf8_lossy(&output.stdout).trim());
    assert_eq!(json["snapshots"], serde_json::json!([]));
}

#[test]
fn robot_ordering_error_is_structured() {
    let cli = CliRunner::new();
    let output = cli
        .cmd()
        .args([
            "compare", "--node", "spine1", "--check", "ntp", "--before-id", "200", "--after-id",
            "100", "--robot",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json = parse_json(String::from_utf8_lossy(&output.stderr).trim());
    assert_eq!(json["error"], serde_json::json!(true));
    assert_eq!(json["recoverable"], serde_json::json!(true));
    assert!(json["message"].as_str().unwrap().contains("200"));
    assert!(json["suggestion"].as_str().unwrap().contains("before"));
}

#[test]
fn robot_missing_snapshot_error_is_recoverable() {
    let cli = CliRunner::new();
    let output = cli
        .cmd()
        .args([
            "compare", "--node", "spine1", "--check", "ntp", "--before-id", "100", "--after-id",
            "200", "--robot",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json = parse_json(String::from_utf8_lossy(&output.stderr).trim());
    assert_eq!(json["error"], serde_json::json!(true));
    assert_eq!(json["recoverable"], serde_json::json!(true));
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("No before snapshot")
    );
}
