//! Runs the `tenantry-cli` binary and checks that `--json` stdout parses,
//! even when the engine logs warnings along the way.

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;

fn run_json(args: &[&str]) -> Value {
    let mut cmd = cargo_bin_cmd!("tenantry-cli");
    let output = cmd
        .env("RUST_LOG", "warn")
        .arg("--json")
        .args(args)
        .output()
        .expect("run tenantry-cli");

    assert!(output.status.success(), "exit status {:?}", output.status);
    serde_json::from_slice(&output.stdout).expect("stdout is a single JSON document")
}

#[test]
fn effective_for_unknown_role_is_valid_json() {
    let value = run_json(&["effective", "--role", "ghost"]);

    assert_eq!(value["source"], "membership");
    assert_eq!(value["level"], 0);
    assert!(value["permissions"].as_array().unwrap().is_empty());
}

#[test]
fn stored_permissions_outside_catalog_keep_json_clean() {
    let value = run_json(&[
        "effective",
        "--role",
        "viewer",
        "--permission",
        "content:view",
        "--permission",
        "billing:refund",
    ]);

    assert_eq!(value["permissions"], serde_json::json!(["content:view"]));
}

#[test]
fn warnings_go_to_stderr() {
    let mut cmd = cargo_bin_cmd!("tenantry-cli");
    let output = cmd
        .env("RUST_LOG", "warn")
        .args(["--json", "effective", "--role", "ghost"])
        .output()
        .expect("run tenantry-cli");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown role resolved to an empty permission set"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("WARN"));
}
