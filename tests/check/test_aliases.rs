// Tests for bodies typed through aliases, utility wrappers, and nullable arrays.
use serde_json::{json, Value};
use tether_core::config::TetherConfig;
use tether_core::registry::TypeRegistry;
use tether_core::types::{CodeEndpoint, ContractEndpoint, SourceUnit, TypeReference};
use tether_enforce::{ConsistencyEngine, LintError, LintErrorKind, MismatchShape};
use tether_parsers::typescript::TypeRegistryBuilder;

const MODELS_TS: &str = r#"
export interface Credentials {
  email: string;
  password: string;
}

export type SignInBody = Credentials;

export interface User {
  id: string;
  name: string;
}

export type UpdateUser = Partial<User>;
export type FrozenUser = Readonly<User>;

export interface Post {
  title: string;
  tags: string[] | null;
  author: Readonly<User>;
}
"#;

fn registry() -> TypeRegistry {
    TypeRegistryBuilder::new()
        .build(&[SourceUnit::new("src/models.ts", MODELS_TS)])
        .output
}

/// Check one `POST things` request body typed as `type_name`.
fn check_request(type_name: &str, body: Value, config: &TetherConfig) -> Vec<LintError> {
    let contract = ContractEndpoint {
        name: "Create thing".to_string(),
        method: "POST".to_string(),
        path: "things".to_string(),
        request_body: Some(body),
        response_body: None,
    };
    let code = CodeEndpoint {
        method: "POST".to_string(),
        path: "things".to_string(),
        request_body_type: Some(TypeReference::imported(type_name, "./models")),
        response_body_type: None,
        file: "src/api.ts".to_string(),
        line: 4,
    };
    ConsistencyEngine::with_config(config).check(&[contract], &[code], &registry())
}

fn codes(errors: &[LintError]) -> Vec<&str> {
    errors.iter().map(|e| e.code.as_str()).collect()
}

#[test]
/// An alias of an interface is diffed exactly like the interface itself.
fn test_alias_of_interface_is_diffed() {
    let body = json!({ "email": "x", "bogus": 1 });
    let config = TetherConfig::default();

    let through_alias = check_request("SignInBody", body.clone(), &config);
    let direct = check_request("Credentials", body, &config);

    assert_eq!(codes(&through_alias), vec!["E003", "E004"]);
    assert!(through_alias[0].message.contains(": password."));
    assert!(through_alias[1].message.contains(": bogus."));
    assert_eq!(
        through_alias.iter().map(|e| &e.message).collect::<Vec<_>>(),
        direct.iter().map(|e| &e.message).collect::<Vec<_>>()
    );
}

#[test]
/// `Partial<User>` accepts an object and makes every property optional.
fn test_partial_alias_properties_are_optional() {
    let errors = check_request("UpdateUser", json!({ "name": "n" }), &TetherConfig::default());
    assert_eq!(codes(&errors), vec!["E003"]);
    assert!(matches!(
        &errors[0].kind,
        LintErrorKind::MissingProperty { properties, .. } if properties == &vec!["id".to_string()]
    ));

    let lenient = TetherConfig {
        allow_missing_optional: true,
        ..TetherConfig::default()
    };
    let errors = check_request("UpdateUser", json!({ "name": "n" }), &lenient);
    assert!(errors.is_empty(), "unexpected: {errors:?}");

    let errors = check_request("UpdateUser", json!({ "name": "n", "age": 3 }), &lenient);
    assert_eq!(codes(&errors), vec!["E004"]);
}

#[test]
/// `Readonly<User>` keeps the properties of `User`, required ones included.
fn test_readonly_alias_and_property_are_unwrapped() {
    let errors = check_request(
        "FrozenUser",
        json!({ "id": "1", "name": "n", "extra": true }),
        &TetherConfig::default(),
    );
    assert_eq!(codes(&errors), vec!["E004"]);

    let errors = check_request(
        "Post",
        json!({ "title": "t", "tags": ["a"], "author": { "id": "1", "name": "n" } }),
        &TetherConfig::default(),
    );
    assert!(errors.is_empty(), "unexpected: {errors:?}");
}

#[test]
/// A nullable array accepts null and a matching array, and still checks elements.
fn test_nullable_array_property() {
    let config = TetherConfig::default();
    let author = json!({ "id": "1", "name": "n" });

    let errors = check_request(
        "Post",
        json!({ "title": "t", "tags": null, "author": author.clone() }),
        &config,
    );
    assert!(errors.is_empty(), "unexpected: {errors:?}");

    let errors = check_request(
        "Post",
        json!({ "title": "t", "tags": [1, 2], "author": author }),
        &config,
    );
    assert_eq!(errors.len(), 1);
    match &errors[0].kind {
        LintErrorKind::TypeMismatch { shape, property, expected, actual, .. } => {
            assert_eq!(*shape, MismatchShape::Array);
            assert_eq!(property, "tags");
            assert_eq!(expected, "string[]");
            assert_eq!(actual, "number");
        }
        other => panic!("unexpected kind {other:?}"),
    }
}
