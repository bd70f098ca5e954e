// Tests for flattening fixture Postman collections.
use std::fs;

use tether_parsers::contract::{ContractError, ContractLoader};

use crate::common::{fixtures, write_project};

#[test]
/// Folders flatten depth-first into request leaves with decoded bodies.
fn test_drifted_collection_flattens() {
    let dir = write_project(&[("api.postman.json", fixtures::drifted_collection())]);
    let parsed = ContractLoader::load_file(&dir.path().join("api.postman.json")).unwrap();
    assert!(parsed.warnings.is_empty());

    let endpoints = parsed.output;
    let summary: Vec<(&str, &str, &str)> = endpoints
        .iter()
        .map(|e| (e.name.as_str(), e.method.as_str(), e.path.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Sign in", "POST", "auth/signin"),
            ("Profile", "GET", "users/:id"),
            ("End session", "DELETE", "sessions/:id"),
        ]
    );
    assert_eq!(endpoints[0].request_body.as_ref().unwrap()["remember_me"], true);
    assert_eq!(endpoints[1].response_body.as_ref().unwrap()["role"], "owner");
    assert!(endpoints[2].request_body.is_none());
    assert!(endpoints[2].response_body.is_none());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = write_project::<&str>(&[]);
    let err = ContractLoader::load_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ContractError::Io { .. }));
}

#[test]
fn test_invalid_json_is_fatal() {
    let dir = write_project(&[("api.postman.json", "{ \"item\": [")]);
    let err = ContractLoader::load_file(&dir.path().join("api.postman.json")).unwrap_err();
    assert!(matches!(err, ContractError::Json(_)));
}

#[test]
fn test_document_without_items_is_not_a_collection() {
    let dir = write_project(&[("openapi.json", r#"{ "openapi": "3.0.0", "paths": {} }"#)]);
    let path = dir.path().join("openapi.json");
    assert!(fs::metadata(&path).is_ok());
    let err = ContractLoader::load_file(&path).unwrap_err();
    assert!(matches!(err, ContractError::NotACollection(_)));
}
