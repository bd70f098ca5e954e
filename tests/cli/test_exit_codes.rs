// Tests for CLI exit code behavior.
use crate::common::{fixtures, run_tether, write_project};

#[test]
/// Exit code 2 when the collection file does not exist.
fn test_exit_code_2_missing_collection() {
    let dir = write_project(&[("src/api.ts", fixtures::REQUESTS_TS)]);
    let out = run_tether(
        dir.path(),
        &["check", "--requests", "src", "--collection", "missing.json"],
    );
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("tether check: cannot read contract"), "stderr: {stderr}");
}

#[test]
/// Exit code 2 when the collection is not valid JSON.
fn test_exit_code_2_invalid_collection() {
    let dir = write_project(&[
        ("src/api.ts", fixtures::REQUESTS_TS),
        ("api.postman.json", "{ not json"),
    ]);
    let out = run_tether(
        dir.path(),
        &["check", "--requests", "src", "--collection", "api.postman.json"],
    );
    assert_eq!(out.status.code(), Some(2));
}

#[test]
/// Exit code 2 when the requests directory does not exist.
fn test_exit_code_2_missing_requests_dir() {
    let dir = write_project(&[("api.postman.json", fixtures::clean_collection())]);
    let out = run_tether(
        dir.path(),
        &["check", "--requests", "nowhere", "--collection", "api.postman.json"],
    );
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("directory not found"));
}

#[test]
/// Exit code 2 for an unsupported completion shell.
fn test_exit_code_2_unknown_shell() {
    let dir = write_project::<&str>(&[]);
    let out = run_tether(dir.path(), &["completion", "tcsh"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
/// clap reports usage errors with exit code 2.
fn test_exit_code_2_missing_arguments() {
    let dir = write_project::<&str>(&[]);
    let out = run_tether(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(2));
}
