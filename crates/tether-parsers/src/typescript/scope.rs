use tether_core::types::TypeReference;
use tree_sitter::Node;

use super::helpers::{is_function_like, named_children, unwrap_parens};
use super::imports::ImportTable;
use super::type_refs::reference_from_type;
use crate::treesitter::node_text;

const MAX_ALIAS_HOPS: usize = 8;

/// Declared type of the value an identifier refers to, found by walking the
/// enclosing scopes outward from `usage`.
///
/// Function parameters are checked first, then `const`/`let`/`var`
/// declarators in each enclosing block. A declarator without an annotation
/// falls back to its `as`/`satisfies` initializer, or follows an identifier
/// initializer a bounded number of times.
pub(crate) fn identifier_type(
    usage: Node<'_>,
    source: &[u8],
    imports: &ImportTable,
) -> Option<TypeReference> {
    resolve(usage, node_text(usage, source), source, imports, 0)
}

fn resolve(
    from: Node<'_>,
    name: &str,
    source: &[u8],
    imports: &ImportTable,
    hops: usize,
) -> Option<TypeReference> {
    if hops > MAX_ALIAS_HOPS {
        return None;
    }
    let mut scope = from.parent();
    while let Some(node) = scope {
        if is_function_like(node) {
            if let Some(param) = find_parameter(node, name, source) {
                return param
                    .child_by_field_name("type")
                    .and_then(|t| reference_from_type(t, source, imports));
            }
        }
        if matches!(node.kind(), "statement_block" | "program") {
            if let Some(declarator) = find_declarator(node, name, source) {
                return declarator_type(declarator, source, imports, hops);
            }
        }
        scope = node.parent();
    }
    None
}

fn find_parameter<'t>(function: Node<'t>, name: &str, source: &[u8]) -> Option<Node<'t>> {
    let params = function.child_by_field_name("parameters")?;
    named_children(params).into_iter().find(|param| {
        matches!(param.kind(), "required_parameter" | "optional_parameter")
            && param
                .child_by_field_name("pattern")
                .is_some_and(|p| p.kind() == "identifier" && node_text(p, source) == name)
    })
}

fn find_declarator<'t>(block: Node<'t>, name: &str, source: &[u8]) -> Option<Node<'t>> {
    named_children(block)
        .into_iter()
        .filter_map(|stmt| {
            if stmt.kind() == "export_statement" {
                stmt.child_by_field_name("declaration")
            } else {
                Some(stmt)
            }
        })
        .filter(|stmt| matches!(stmt.kind(), "lexical_declaration" | "variable_declaration"))
        .flat_map(named_children)
        .find(|declarator| {
            declarator.kind() == "variable_declarator"
                && declarator
                    .child_by_field_name("name")
                    .is_some_and(|n| n.kind() == "identifier" && node_text(n, source) == name)
        })
}

fn declarator_type(
    declarator: Node<'_>,
    source: &[u8],
    imports: &ImportTable,
    hops: usize,
) -> Option<TypeReference> {
    if let Some(annotation) = declarator.child_by_field_name("type") {
        return reference_from_type(annotation, source, imports);
    }
    let value = unwrap_parens(declarator.child_by_field_name("value")?);
    match value.kind() {
        "as_expression" | "satisfies_expression" => asserted_type(value, source, imports),
        "identifier" => resolve(declarator, node_text(value, source), source, imports, hops + 1),
        _ => None,
    }
}

/// Type named by `expr as T` or `expr satisfies T`.
pub(crate) fn asserted_type(
    node: Node<'_>,
    source: &[u8],
    imports: &ImportTable,
) -> Option<TypeReference> {
    named_children(node)
        .into_iter()
        .skip(1)
        .last()
        .and_then(|t| reference_from_type(t, source, imports))
}
