use rayon::prelude::*;
use tether_core::registry::{PropertyType, TypeDefinition, TypeKind, TypeProperty, TypeRegistry};
use tether_core::types::{Parsed, SourceUnit};
use tree_sitter::Node;

use super::helpers::{named_children, property_key, unquote};
use super::type_refs::classify_property_type;
use super::{collect_captures, parse_unit, skipped_unit};
use crate::treesitter::{node_text, ParseError};

/// Builds a [`TypeRegistry`] from interface, type-alias, and enum declarations.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistryBuilder;

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Collect declarations from every unit. Units with syntax errors are
    /// skipped with a warning; the rest still contribute.
    pub fn build(&self, units: &[SourceUnit]) -> Parsed<TypeRegistry> {
        let per_unit: Vec<Result<Vec<TypeDefinition>, ParseError>> =
            units.par_iter().map(|unit| self.declarations(unit)).collect();

        let mut definitions = Vec::new();
        let mut warnings = Vec::new();
        for (unit, result) in units.iter().zip(per_unit) {
            match result {
                Ok(defs) => definitions.extend(defs),
                Err(e) => warnings.push(skipped_unit(unit, "type collection", &e)),
            }
        }

        let registry = TypeRegistry::from_definitions(definitions);
        tracing::debug!(types = registry.len(), files = units.len(), "type registry built");
        Parsed::new(registry, warnings)
    }

    /// Declarations of a single unit, in source order.
    pub fn declarations(&self, unit: &SourceUnit) -> Result<Vec<TypeDefinition>, ParseError> {
        let (tree, lang) = parse_unit(unit)?;
        let source = unit.content.as_bytes();
        let captures = collect_captures(lang, tree.root_node(), source)?;

        let mut found: Vec<(usize, TypeDefinition)> = Vec::new();
        for node in captures.interfaces {
            if let Some(def) = interface_definition(node, source) {
                found.push((node.start_byte(), def));
            }
        }
        for node in captures.aliases {
            if let Some(def) = alias_definition(node, source) {
                found.push((node.start_byte(), def));
            }
        }
        for node in captures.enums {
            if let Some(def) = enum_definition(node, source) {
                found.push((node.start_byte(), def));
            }
        }
        found.sort_by_key(|(start, _)| *start);

        Ok(found
            .into_iter()
            .map(|(_, mut def)| {
                def.file = unit.path.clone();
                def
            })
            .collect())
    }
}

fn declaration_name(node: Node<'_>, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
}

fn interface_definition(node: Node<'_>, source: &[u8]) -> Option<TypeDefinition> {
    let mut def = TypeDefinition::new(declaration_name(node, source)?, TypeKind::Interface);

    for child in named_children(node) {
        if child.kind() == "extends_type_clause" {
            def.extends
                .extend(named_children(child).into_iter().filter_map(|t| heritage_name(t, source)));
        }
    }
    if let Some(body) = node.child_by_field_name("body") {
        collect_properties(body, source, &mut def);
    }
    Some(def)
}

/// Bare name of a parent type in `extends` or an intersection.
fn heritage_name(node: Node<'_>, source: &[u8]) -> Option<String> {
    match node.kind() {
        "type_identifier" => Some(node_text(node, source).to_string()),
        "generic_type" | "nested_type_identifier" => node
            .child_by_field_name("name")
            .and_then(|n| heritage_name(n, source)),
        _ => None,
    }
}

fn collect_properties(body: Node<'_>, source: &[u8], def: &mut TypeDefinition) {
    for member in named_children(body) {
        if member.kind() != "property_signature" {
            continue;
        }
        let Some(name) = member
            .child_by_field_name("name")
            .and_then(|n| property_key(n, source))
        else {
            continue;
        };
        let ty = match member.child_by_field_name("type") {
            Some(annotation) => classify_property_type(annotation, source),
            None => PropertyType::Primitive("any".to_string()),
        };
        let mut cursor = member.walk();
        let optional = member.children(&mut cursor).any(|c| c.kind() == "?");
        let property = if optional {
            TypeProperty::optional(ty)
        } else {
            TypeProperty::required(ty)
        };
        def.properties.insert(name, property);
    }
}

fn alias_definition(node: Node<'_>, source: &[u8]) -> Option<TypeDefinition> {
    let mut def = TypeDefinition::new(declaration_name(node, source)?, TypeKind::Alias);
    let value = node.child_by_field_name("value")?;

    match value.kind() {
        "object_type" => collect_properties(value, source, &mut def),
        "intersection_type" if intersection_is_object(value) => {
            for part in flatten_binary(value, "intersection_type") {
                if part.kind() == "object_type" {
                    collect_properties(part, source, &mut def);
                } else if let Some(parent) = heritage_name(part, source) {
                    def.extends.push(parent);
                }
            }
        }
        _ => {
            let target = classify_property_type(value, source);
            def.properties
                .insert("type".to_string(), TypeProperty::required(target.clone()));
            def.alias_of = Some(target);
            if let Some(literals) = literal_union(value, source) {
                for literal in literals {
                    def.members.insert(literal.clone(), literal);
                }
            }
        }
    }
    Some(def)
}

/// Operands of a left-nested binary type (`A & B & C`, `"a" | "b"`).
fn flatten_binary<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    if node.kind() != kind {
        return vec![node];
    }
    named_children(node)
        .into_iter()
        .flat_map(|child| flatten_binary(child, kind))
        .collect()
}

fn intersection_is_object(node: Node<'_>) -> bool {
    flatten_binary(node, "intersection_type").iter().all(|part| {
        matches!(
            part.kind(),
            "object_type" | "type_identifier" | "generic_type" | "nested_type_identifier"
        )
    })
}

/// Values of a union made only of literal types, or of a single literal type.
fn literal_union(node: Node<'_>, source: &[u8]) -> Option<Vec<String>> {
    let parts = flatten_binary(node, "union_type");
    parts
        .into_iter()
        .map(|part| {
            if part.kind() != "literal_type" {
                return None;
            }
            let literal = named_children(part).into_iter().next()?;
            Some(match literal.kind() {
                "string" => unquote(node_text(literal, source)),
                _ => node_text(literal, source).to_string(),
            })
        })
        .collect()
}

fn enum_definition(node: Node<'_>, source: &[u8]) -> Option<TypeDefinition> {
    let mut def = TypeDefinition::new(declaration_name(node, source)?, TypeKind::Enum);
    let body = node.child_by_field_name("body")?;
    let mut next_auto: i64 = 0;

    for member in named_children(body) {
        let (name_node, value_node) = match member.kind() {
            "enum_assignment" => (member.child_by_field_name("name"), member.child_by_field_name("value")),
            _ => (Some(member), None),
        };
        let Some(name) = name_node.and_then(|n| property_key(n, source)) else {
            continue;
        };

        let value = match value_node {
            None => {
                let v = next_auto.to_string();
                next_auto += 1;
                v
            }
            Some(v) if v.kind() == "string" => unquote(node_text(v, source)),
            Some(v) if v.kind() == "number" => {
                let text = node_text(v, source).to_string();
                if let Ok(n) = text.parse::<i64>() {
                    next_auto = n + 1;
                }
                text
            }
            Some(v) => node_text(v, source).to_string(),
        };
        def.members.insert(name, value);
    }
    Some(def)
}
