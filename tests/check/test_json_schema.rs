// Contract tests for check output JSON schema compliance.
use tether_core::config::TetherConfig;
use tether_output::json::JsonFormatter;
use tether_output::OutputFormatter;

use super::test_pipeline::analyze;
use crate::common::{fixtures, write_project};

const CHECK_SCHEMA: &str = include_str!("../schemas/check_output.schema.json");

fn validate_against_schema(json_value: &serde_json::Value, schema_str: &str) {
    let schema: serde_json::Value = serde_json::from_str(schema_str).unwrap();
    let validator = jsonschema::validator_for(&schema).expect("Failed to compile JSON schema");
    let errors: Vec<_> = validator.iter_errors(json_value).collect();
    if !errors.is_empty() {
        let msgs: Vec<String> = errors
            .iter()
            .map(|e| format!("  - {} (at {})", e, e.instance_path))
            .collect();
        panic!("JSON schema validation failed:\n{}", msgs.join("\n"));
    }
}

#[test]
fn clean_check_output_matches_schema() {
    let dir = write_project(&fixtures::clean_project());
    let result = analyze(dir.path(), &TetherConfig::default());

    let rendered = JsonFormatter.format_check(&result);
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    validate_against_schema(&value, CHECK_SCHEMA);
    assert_eq!(value["status"], "ok");
}

#[test]
fn drifted_check_output_matches_schema() {
    let dir = write_project(&fixtures::drifted_project());
    let result = analyze(dir.path(), &TetherConfig::default());

    let value = serde_json::to_value(&result).unwrap();
    validate_against_schema(&value, CHECK_SCHEMA);

    let kinds: Vec<&str> = value["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"]["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "missing_property",
            "extra_property",
            "invalid_enum_value",
            "endpoint_missing_in_contract",
            "endpoint_missing_in_code",
        ]
    );
    assert_eq!(value["errors"][0]["kind"]["side"], "request");
    assert_eq!(value["errors"][0]["kind"]["properties"][0], "stay_logged_in");
}
