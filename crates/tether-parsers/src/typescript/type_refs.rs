use std::sync::OnceLock;

use regex::Regex;
use tether_core::registry::PropertyType;
use tether_core::types::TypeReference;
use tree_sitter::Node;

use super::helpers::named_children;
use super::imports::ImportTable;
use crate::treesitter::node_text;

const MAX_TYPE_DEPTH: usize = 16;

fn import_type_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"import\("(.*)"\)\.(\w+)"#).expect("import type pattern is valid"))
}

/// Build a [`TypeReference`] from type syntax. Literal and inline object
/// types have no name to look up and yield `None`.
pub(crate) fn reference_from_type(
    node: Node<'_>,
    source: &[u8],
    imports: &ImportTable,
) -> Option<TypeReference> {
    reference_at_depth(node, source, imports, 0)
}

fn reference_at_depth(
    node: Node<'_>,
    source: &[u8],
    imports: &ImportTable,
    depth: usize,
) -> Option<TypeReference> {
    if depth > MAX_TYPE_DEPTH {
        return None;
    }
    let recurse = |n: Node<'_>| reference_at_depth(n, source, imports, depth + 1);

    match node.kind() {
        "type_annotation" | "parenthesized_type" | "readonly_type" | "union_type" => {
            named_children(node).into_iter().next().and_then(recurse)
        }
        "array_type" => named_children(node)
            .into_iter()
            .next()
            .and_then(recurse)
            .map(TypeReference::into_array),
        "generic_type" => {
            let name = node.child_by_field_name("name")?;
            let first_arg = node
                .child_by_field_name("type_arguments")
                .and_then(|args| named_children(args).into_iter().next());
            let name_text = node_text(name, source);
            match first_arg {
                Some(arg) if is_array_generic(name_text) => {
                    recurse(arg).map(TypeReference::into_array)
                }
                // Promise<T>, Partial<T>, ApiResponse<T>: the payload is the argument.
                Some(arg) => recurse(arg),
                None => recurse(name),
            }
        }
        "type_identifier" => {
            let name = node_text(node, source);
            Some(match imports.module_of(name) {
                Some(module) => TypeReference::imported(name, module),
                None => TypeReference::local(name),
            })
        }
        "nested_type_identifier" => {
            let name = node_text(node.child_by_field_name("name")?, source);
            let qualifier = node
                .child_by_field_name("module")
                .map(|m| node_text(m, source))
                .unwrap_or_default();
            let root = qualifier.split('.').next().unwrap_or(qualifier);
            let module = imports.module_of(root).unwrap_or(qualifier);
            Some(TypeReference::imported(name, module))
        }
        "predefined_type" => Some(TypeReference::local(node_text(node, source))),
        "literal_type" | "object_type" => None,
        _ => {
            let caps = import_type_pattern().captures(node_text(node, source))?;
            Some(TypeReference::imported(&caps[2], &caps[1]))
        }
    }
}

fn is_array_generic(name: &str) -> bool {
    name == "Array" || name == "ReadonlyArray"
}

/// Classify the declared type of a property signature or alias target.
pub(crate) fn classify_property_type(node: Node<'_>, source: &[u8]) -> PropertyType {
    let node = strip_type_wrappers(node);
    match node.kind() {
        "object_type" => PropertyType::ObjectInline,
        "predefined_type" => {
            let text = node_text(node, source);
            if text == "object" {
                PropertyType::ObjectInline
            } else {
                PropertyType::Primitive(text.to_string())
            }
        }
        "array_type" => match named_children(node).into_iter().next() {
            Some(element) => PropertyType::ArrayOf(element_text(element, source)),
            None => PropertyType::Reference(node_text(node, source).to_string()),
        },
        "generic_type" => {
            let name = node
                .child_by_field_name("name")
                .map(|n| node_text(n, source))
                .unwrap_or_default();
            let first_arg = node
                .child_by_field_name("type_arguments")
                .and_then(|args| named_children(args).into_iter().next());
            match first_arg {
                Some(arg) if is_array_generic(name) => {
                    PropertyType::ArrayOf(element_text(arg, source))
                }
                _ => PropertyType::Reference(node_text(node, source).to_string()),
            }
        }
        _ => PropertyType::Reference(node_text(node, source).trim().to_string()),
    }
}

fn strip_type_wrappers(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while matches!(current.kind(), "type_annotation" | "parenthesized_type") {
        match named_children(current).into_iter().next() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

fn element_text(node: Node<'_>, source: &[u8]) -> String {
    let node = strip_type_wrappers(node);
    if node.kind() == "object_type" {
        "object".to_string()
    } else {
        node_text(node, source).trim().to_string()
    }
}
