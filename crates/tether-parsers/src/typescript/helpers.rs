use tree_sitter::Node;

use crate::treesitter::node_text;

/// Named children, skipping comments.
pub(crate) fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

/// Walk up through wrappers that do not change an expression's value.
pub(crate) fn unwrap_parens(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while current.kind() == "parenthesized_expression" {
        match named_children(current).into_iter().next() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// Strip the surrounding quotes from a string literal's source text.
pub(crate) fn unquote(text: &str) -> String {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('\'' | '"' | '`')), Some(close)) if open == close && trimmed.len() >= 2 => {
            chars.as_str().to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Value of a `string` node, without quotes.
pub(crate) fn string_value(node: Node<'_>, source: &[u8]) -> Option<String> {
    (node.kind() == "string").then(|| unquote(node_text(node, source)))
}

/// Literal text of a template string with every `${...}` slot erased.
pub(crate) fn template_text(node: Node<'_>, source: &[u8]) -> String {
    let mut out = String::new();
    let mut pos = node.start_byte();
    for child in named_children(node) {
        if child.kind() == "template_substitution" {
            out.push_str(slice(source, pos, child.start_byte()));
            pos = child.end_byte();
        }
    }
    out.push_str(slice(source, pos, node.end_byte()));
    out.trim_start_matches('`').trim_end_matches('`').to_string()
}

/// True when the template has at least one `${...}` slot.
pub(crate) fn has_substitution(node: Node<'_>) -> bool {
    node.kind() == "template_string"
        && named_children(node)
            .iter()
            .any(|c| c.kind() == "template_substitution")
}

/// Text of a string literal or template literal used as a URL.
pub(crate) fn literal_text(node: Node<'_>, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => string_value(node, source),
        "template_string" => Some(template_text(node, source)),
        _ => None,
    }
}

/// Property key as written in an object literal or type member.
pub(crate) fn property_key(node: Node<'_>, source: &[u8]) -> Option<String> {
    match node.kind() {
        "property_identifier" | "identifier" | "number" | "private_property_identifier" => {
            Some(node_text(node, source).to_string())
        }
        "string" => string_value(node, source),
        _ => None,
    }
}

/// Value node of `key: value` inside an object literal.
pub(crate) fn object_property<'t>(object: Node<'t>, key: &str, source: &[u8]) -> Option<Node<'t>> {
    named_children(object)
        .into_iter()
        .filter(|child| child.kind() == "pair")
        .find(|pair| {
            pair.child_by_field_name("key")
                .and_then(|k| property_key(k, source))
                .is_some_and(|k| k == key)
        })
        .and_then(|pair| pair.child_by_field_name("value"))
}

fn slice(source: &[u8], start: usize, end: usize) -> &str {
    source
        .get(start..end)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .unwrap_or("")
}

/// Whether `node` is a function-like scope that can declare a return type.
pub(crate) fn is_function_like(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "function_declaration"
            | "function_expression"
            | "function"
            | "arrow_function"
            | "method_definition"
            | "generator_function_declaration"
            | "generator_function"
    )
}
