// Tests for the full pipeline: discovery, registry, extraction, contract, engine.
use std::path::Path;

use tether_core::config::TetherConfig;
use tether_enforce::{CheckResult, ConsistencyEngine, LintErrorKind};
use tether_parsers::contract::ContractLoader;
use tether_parsers::typescript::{EndpointExtractor, TypeRegistryBuilder};
use tether_parsers::walker::{load_sources, FileWalker};

use crate::common::{fixtures, write_project};

/// Run a check over `<dir>/<types>` declarations, `<dir>/src` call sites and
/// `<dir>/api.postman.json`.
pub(crate) fn analyze_with(dir: &Path, types: &str, config: &TetherConfig) -> CheckResult {
    let walk = |sub: &str| {
        let entries = FileWalker::new(&dir.join(sub))
            .with_ignore_patterns(&config.ignore_patterns)
            .walk();
        load_sources(&entries)
    };
    let requests = walk("src");
    let declarations = walk(types);

    let registry = TypeRegistryBuilder::new().build(&declarations.output);
    let code = EndpointExtractor::from_config(config).extract(&requests.output);
    let contract = ContractLoader::load_file(&dir.join("api.postman.json")).unwrap();

    let mut warnings = contract.warnings;
    warnings.extend(registry.warnings);
    warnings.extend(code.warnings);
    ConsistencyEngine::with_config(config)
        .run(&contract.output, &code.output, &registry.output)
        .with_warnings(warnings)
}

pub(crate) fn analyze(dir: &Path, config: &TetherConfig) -> CheckResult {
    analyze_with(dir, "src", config)
}

pub(crate) fn codes(result: &CheckResult) -> Vec<&str> {
    result.errors.iter().map(|e| e.code.as_str()).collect()
}

#[test]
/// Agreeing code and contract produce no diagnostics at all.
fn test_clean_project_has_no_discrepancies() {
    let dir = write_project(&fixtures::clean_project());
    let result = analyze(dir.path(), &TetherConfig::default());

    assert!(result.is_clean(), "unexpected: {:?}", result.messages());
    assert_eq!(result.status, "ok");
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
    assert_eq!(result.summary.contract_endpoints, 2);
    assert_eq!(result.summary.code_endpoints, 2);
    assert_eq!(result.summary.matched, 2);
    assert_eq!(result.summary.types, 4);
}

#[test]
/// Body checks come first, then code-only endpoints, then contract-only ones.
fn test_drifted_project_reports_each_family_in_order() {
    let dir = write_project(&fixtures::drifted_project());
    let result = analyze(dir.path(), &TetherConfig::default());

    assert_eq!(codes(&result), vec!["E003", "E004", "E005", "E008", "E009"]);
    assert_eq!(result.status, "error");
    assert_eq!(result.summary.contract_endpoints, 3);
    assert_eq!(result.summary.code_endpoints, 3);
    assert_eq!(result.summary.matched, 2);

    let messages = result.messages();
    assert_eq!(
        messages[0],
        "Missing properties in request body for endpoint Sign in: stay_logged_in. \
         Expected properties: email, password, stay_logged_in"
    );
    assert_eq!(
        messages[1],
        "Extra properties in request body for endpoint Sign in: remember_me. \
         Expected properties: email, password, stay_logged_in"
    );
    assert!(messages[2].contains("'role'"));
    assert!(messages[2].contains("Expected one of admin, member, but got: owner"));
    assert_eq!(
        messages[3],
        "Endpoint found in code but not defined in contract: GET health"
    );
    assert_eq!(
        messages[4],
        "Endpoint defined in contract but not found in code: DELETE sessions/:id"
    );
}

#[test]
/// Code-side diagnostics point at the call site.
fn test_unmatched_code_error_carries_call_site() {
    let dir = write_project(&fixtures::drifted_project());
    let result = analyze(dir.path(), &TetherConfig::default());

    let e008 = result
        .errors
        .iter()
        .find(|e| e.kind == LintErrorKind::EndpointMissingInContract)
        .expect("E008 present");
    assert!(e008.file.as_deref().unwrap_or("").ends_with("api.ts"));
    assert_eq!(e008.line, Some(18));

    let e009 = result
        .errors
        .iter()
        .find(|e| e.kind == LintErrorKind::EndpointMissingInCode)
        .expect("E009 present");
    assert!(e009.file.is_none());
}

#[test]
/// Declarations may live in a separate directory from the call sites.
fn test_types_in_separate_directory() {
    let dir = write_project(&[
        ("types/models.ts", fixtures::TYPES_TS.to_string()),
        ("src/api.ts", fixtures::REQUESTS_TS.to_string()),
        ("api.postman.json", fixtures::clean_collection()),
    ]);
    let result = analyze_with(dir.path(), "types", &TetherConfig::default());
    assert!(result.is_clean(), "unexpected: {:?}", result.messages());
}

#[test]
/// Without declarations every typed body is reported as unresolvable.
fn test_missing_declarations_report_missing_types() {
    let dir = write_project(&[
        ("types/empty.ts", "export {};\n".to_string()),
        ("src/api.ts", fixtures::REQUESTS_TS.to_string()),
        ("api.postman.json", fixtures::clean_collection()),
    ]);
    let result = analyze_with(dir.path(), "types", &TetherConfig::default());
    assert_eq!(codes(&result), vec!["E001", "E002", "E002"]);
    assert!(result.messages()[0].starts_with(
        "No matching request type definition found for endpoint: Sign in"
    ));
}

#[test]
/// A source file with broken syntax is skipped with a warning; the rest still runs.
fn test_syntax_error_unit_is_skipped() {
    let mut files = fixtures::clean_project();
    files.push(("src/broken.ts", "export const = fetch('/oops', {;\n".to_string()));
    let dir = write_project(&files);

    let result = analyze(dir.path(), &TetherConfig::default());
    assert!(result.is_clean(), "unexpected: {:?}", result.messages());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.file.ends_with("broken.ts")));
}
