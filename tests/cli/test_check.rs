// Tests for `tether check` output in both formats.
use crate::common::{fixtures, run_tether, stdout_json, write_project};

const CHECK_ARGS: [&str; 5] = ["check", "--requests", "src", "--collection", "api.postman.json"];

#[test]
fn test_check_clean_human_output() {
    let dir = write_project(&fixtures::clean_project());
    let out = run_tether(dir.path(), &CHECK_ARGS);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("No discrepancies found."), "stdout: {stdout}");
    assert!(stdout.contains("2 contract endpoint(s), 2 code endpoint(s), 2 matched, 4 type(s)"));
}

#[test]
fn test_check_drifted_human_output() {
    let dir = write_project(&fixtures::drifted_project());
    let out = run_tether(dir.path(), &CHECK_ARGS);

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(
        "1. error[E003]: Missing properties in request body for endpoint Sign in: stay_logged_in."
    ));
    assert!(stdout.contains("4. error[E008]: Endpoint found in code but not defined in contract: GET health"));
    assert!(stdout.contains("api.ts:18"));
    assert!(stdout.contains(
        "5. error[E009]: Endpoint defined in contract but not found in code: DELETE sessions/:id"
    ));
    assert!(stdout.contains("5 discrepancy(ies) found"));
}

#[test]
fn test_check_drifted_json_output() {
    let dir = write_project(&fixtures::drifted_project());
    let mut args = CHECK_ARGS.to_vec();
    args.push("--json");
    let out = run_tether(dir.path(), &args);

    assert_eq!(out.status.code(), Some(1));
    let json = stdout_json(&out);
    assert_eq!(json["command"], "check");
    assert_eq!(json["status"], "error");
    let codes: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["E003", "E004", "E005", "E008", "E009"]);
}

#[test]
/// A tether.json in the working directory is picked up.
fn test_check_reads_config_from_working_directory() {
    let mut files = fixtures::drifted_project();
    files.push((
        "tether.json",
        r#"{ "enforce": { "unmatched_code": false, "unmatched_contract": false } }"#.to_string(),
    ));
    let dir = write_project(&files);
    let out = run_tether(dir.path(), &[&CHECK_ARGS[..], &["--json"][..]].concat());

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout_json(&out)["errors"].as_array().unwrap().len(), 3);
}

#[test]
/// `--target` overrides configured call targets.
fn test_check_target_flag() {
    let mut files = fixtures::clean_project();
    files.push((
        "src/client.ts",
        "export const ping = () => apiClient('/ping');\n".to_string(),
    ));
    let dir = write_project(&files);

    let out = run_tether(dir.path(), &CHECK_ARGS);
    assert_eq!(out.status.code(), Some(0));

    let args = [&CHECK_ARGS[..], &["--target", "fetch", "--target", "apiClient"][..]].concat();
    let out = run_tether(dir.path(), &args);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("GET ping"));
}

#[test]
/// `--types` points the registry at a different directory.
fn test_check_separate_types_directory() {
    let dir = write_project(&[
        ("models/types.ts", fixtures::TYPES_TS.to_string()),
        ("src/api.ts", fixtures::REQUESTS_TS.to_string()),
        ("api.postman.json", fixtures::clean_collection()),
    ]);
    let out = run_tether(
        dir.path(),
        &["check", "--requests", "src", "--types", "models", "--collection", "api.postman.json"],
    );
    assert_eq!(out.status.code(), Some(0), "stdout: {}", String::from_utf8_lossy(&out.stdout));
}
