// Tests for building the type registry from fixture declarations.
use tether_core::registry::{PropertyType, TypeKind};
use tether_core::types::SourceUnit;
use tether_parsers::typescript::TypeRegistryBuilder;

use crate::common::fixtures;

#[test]
/// Every fixture declaration lands in the registry with its shape.
fn test_fixture_types_are_registered() {
    let unit = SourceUnit::new("src/types.ts", fixtures::TYPES_TS);
    let parsed = TypeRegistryBuilder::new().build(&[unit]);
    assert!(parsed.warnings.is_empty());

    let registry = parsed.output;
    assert_eq!(registry.len(), 4);

    let sign_in = registry.get("SignInRequestBody").unwrap();
    assert_eq!(sign_in.kind, TypeKind::Interface);
    assert_eq!(sign_in.property_names(), vec!["email", "password", "stay_logged_in"]);
    assert_eq!(sign_in.file, "src/types.ts");

    let response = registry.get("SignInResponseBody").unwrap();
    assert_eq!(response.properties["user"].ty, PropertyType::ObjectInline);

    let role = registry.get("Role").unwrap();
    assert!(role.is_enum_like());
    assert_eq!(role.enum_values(), vec!["admin", "member"]);

    let profile = registry.get("ProfileResponseBody").unwrap();
    assert!(profile.properties["nickname"].optional);
    assert!(!profile.properties["email"].optional);
    assert_eq!(
        profile.properties["tags"].ty,
        PropertyType::ArrayOf("string".to_string())
    );
    assert_eq!(
        profile.properties["role"].ty,
        PropertyType::Reference("Role".to_string())
    );
}

#[test]
/// Declarations spread over several files flatten inheritance across them.
fn test_extends_across_files() {
    let units = [
        SourceUnit::new(
            "src/base.ts",
            "export interface Timestamped { created_at: string; updated_at: string; }\n",
        ),
        SourceUnit::new(
            "src/user.ts",
            "import { Timestamped } from './base';\nexport interface User extends Timestamped { id: string; }\n",
        ),
    ];
    let registry = TypeRegistryBuilder::new().build(&units).output;
    let user = registry.get("User").unwrap();
    assert_eq!(user.property_names(), vec!["created_at", "updated_at", "id"]);
    assert_eq!(user.extends, vec!["Timestamped"]);
}
