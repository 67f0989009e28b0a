//! CLI contract tests
//!
//! Runs the built binary against the fixtures and checks output formats,
//! exit codes and stdin handling.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn secanalyzer_bin() -> &'static str {
    env!("CARGO_BIN_EXE_secanalyzer")
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(secanalyzer_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("OPENAI_API_KEY")
        .output()
        .expect("failed to run secanalyzer")
}

fn run_json(path: &Path, extra_args: &[&str]) -> (i32, serde_json::Value) {
    let path = path.to_str().unwrap();
    let mut args = vec!["analyze", path, "--format", "json"];
    args.extend_from_slice(extra_args);
    let output = run(&args);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, stdout));
    (output.status.code().unwrap_or(-1), json)
}

#[test]
fn test_json_report_for_vulnerable_file() {
    let (code, json) = run_json(&fixture("vulnerable.js"), &[]);
    assert_eq!(code, 0);
    assert_eq!(json["score"], 0);
    assert_eq!(json["rating"], "poor");

    let findings = json["findings"].as_array().unwrap();
    assert!(findings
        .iter()
        .any(|f| f["rule"] == "no-weak-crypto" && f["line"] == 21));
    assert!(findings
        .iter()
        .any(|f| f["rule"] == "require-route-auth" && f["line"] == 10));
}

#[test]
fn test_clean_file_passes_fail_on() {
    let (code, json) = run_json(&fixture("clean.js"), &["--fail-on", "low"]);
    assert_eq!(code, 0);
    assert_eq!(json["score"], 100);
    assert_eq!(json["findings"].as_array().unwrap().len(), 0);
}

#[test]
fn test_fail_on_high_exits_nonzero() {
    let path = fixture("vulnerable.js");
    let output = run(&["analyze", path.to_str().unwrap(), "--fail-on", "high", "--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--fail-on=high"), "stderr: {}", stderr);
}

#[test]
fn test_fail_on_ignores_display_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("debug.js");
    std::fs::write(&path, "console.log(x);\nel.innerHTML = y;\n").unwrap();

    let (code, json) = run_json(&path, &["--severity", "high", "--fail-on", "medium"]);
    assert_eq!(code, 1);
    assert_eq!(json["findings"].as_array().unwrap().len(), 0);
    assert_eq!(json["score"], 95);
    assert_eq!(json["summary"]["total"], 2);
}

#[test]
fn test_stdin_input() {
    let mut child = Command::new(secanalyzer_bin())
        .args(["analyze", "-", "--format", "json"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn secanalyzer");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"const x = 1;\neval(input);\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "<stdin>");
    assert_eq!(json["score"], 85);
    assert_eq!(json["findings"][0]["rule"], "no-eval");
    assert_eq!(json["findings"][0]["line"], 2);
}

#[test]
fn test_output_file_and_sarif() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results.sarif.json");
    let path = fixture("vulnerable.js");

    let output = run(&[
        "analyze",
        path.to_str().unwrap(),
        "--format",
        "sarif",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let sarif: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(sarif["version"], "2.1.0");
    assert!(!sarif["runs"][0]["results"].as_array().unwrap().is_empty());
}

#[test]
fn test_text_output_without_color() {
    let path = fixture("vulnerable.js");
    let output = run(&["analyze", path.to_str().unwrap(), "--no-color"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains('\x1b'));
    assert!(stdout.contains("Security Score: 0%"));
    assert!(stdout.contains("https://security-docs.example.com/no-eval"));
}

#[test]
fn test_ai_without_key_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture("clean.js");
    let output = Command::new(secanalyzer_bin())
        .args(["analyze", path.to_str().unwrap(), "--ai"])
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        // Point config lookups at an empty directory
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OPENAI_API_KEY"), "stderr: {}", stderr);
}

#[test]
fn test_missing_file_is_error() {
    let output = run(&["analyze", "/definitely/not/here.js"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read"));
}

#[test]
fn test_rules_command_lists_catalog() {
    let output = run(&["rules"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in [
        "no-sql-injection",
        "no-new-func",
        "no-advanced-sql-injection",
        "no-weak-crypto",
        "require-route-auth",
        "ai-security-check",
    ] {
        assert!(stdout.contains(id), "missing {} in rules output", id);
    }
}
