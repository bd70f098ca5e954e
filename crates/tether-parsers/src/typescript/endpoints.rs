use rayon::prelude::*;
use tether_core::config::TetherConfig;
use tether_core::types::{CodeEndpoint, Parsed, SourceUnit, TypeReference};
use tree_sitter::Node;

use super::helpers::{
    has_substitution, is_function_like, literal_text, named_children, object_property,
    string_value, template_text, unwrap_parens,
};
use super::imports::ImportTable;
use super::scope::{asserted_type, identifier_type};
use super::type_refs::reference_from_type;
use super::{collect_captures, parse_unit, skipped_unit, CallCapture};
use crate::treesitter::{node_text, ParseError};

/// Recovers HTTP call sites from client source code.
#[derive(Debug, Clone)]
pub struct EndpointExtractor {
    call_targets: Vec<String>,
    serializers: Vec<String>,
}

impl Default for EndpointExtractor {
    fn default() -> Self {
        Self::from_config(&TetherConfig::default())
    }
}

impl EndpointExtractor {
    pub fn new(call_targets: Vec<String>, serializers: Vec<String>) -> Self {
        Self {
            call_targets,
            serializers,
        }
    }

    pub fn from_config(config: &TetherConfig) -> Self {
        Self::new(config.call_targets.clone(), config.serializers.clone())
    }

    /// Extract endpoints from every unit, preserving unit order and source
    /// order within a unit. Unparseable units are skipped with a warning.
    pub fn extract(&self, units: &[SourceUnit]) -> Parsed<Vec<CodeEndpoint>> {
        let per_unit: Vec<Result<Vec<CodeEndpoint>, ParseError>> =
            units.par_iter().map(|unit| self.extract_unit(unit)).collect();

        let mut endpoints = Vec::new();
        let mut warnings = Vec::new();
        for (unit, result) in units.iter().zip(per_unit) {
            match result {
                Ok(found) => endpoints.extend(found),
                Err(e) => warnings.push(skipped_unit(unit, "endpoint extraction", &e)),
            }
        }
        tracing::debug!(endpoints = endpoints.len(), files = units.len(), "endpoints extracted");
        Parsed::new(endpoints, warnings)
    }

    /// Call sites of a single unit.
    pub fn extract_unit(&self, unit: &SourceUnit) -> Result<Vec<CodeEndpoint>, ParseError> {
        let (tree, lang) = parse_unit(unit)?;
        let source = unit.content.as_bytes();
        let root = tree.root_node();
        let captures = collect_captures(lang, root, source)?;
        let imports = ImportTable::from_root(root, source);
        let base_path = base_path(root, source);

        let site = CallSite {
            source,
            imports: &imports,
            base_path: base_path.as_deref(),
            file: &unit.path,
        };
        Ok(captures
            .calls
            .into_iter()
            .filter(|call| self.is_http_call(node_text(call.callee, source)))
            .filter_map(|call| self.endpoint_for(&site, call))
            .collect())
    }

    fn is_http_call(&self, callee: &str) -> bool {
        self.call_targets.iter().any(|target| callee.contains(target.as_str()))
    }

    fn endpoint_for(&self, site: &CallSite<'_>, call: CallCapture<'_>) -> Option<CodeEndpoint> {
        let args = named_children(call.args);
        let raw_url = literal_text(*args.first()?, site.source)?;
        if raw_url.is_empty() {
            return None;
        }

        let options = args
            .iter()
            .skip(1)
            .last()
            .copied()
            .filter(|node| node.kind() == "object");

        let method = options
            .and_then(|opts| object_property(opts, "method", site.source))
            .and_then(|value| string_value(value, site.source))
            .map(|m| m.to_uppercase())
            .unwrap_or_else(|| "GET".to_string());

        let request_body_type = options
            .and_then(|opts| object_property(opts, "body", site.source))
            .and_then(|body| self.request_body_type(body, site));

        let line = call.call.start_position().row as u32 + 1;
        tracing::trace!(file = %site.file, line, %method, url = %raw_url, "call site");

        Some(CodeEndpoint {
            method,
            path: resolve_path(&raw_url, site.base_path),
            request_body_type,
            response_body_type: response_body_type(call.call, site),
            file: site.file.to_string(),
            line,
        })
    }

    /// `body: <serializer>(arg)` where `arg` names a typed value.
    fn request_body_type(&self, body: Node<'_>, site: &CallSite<'_>) -> Option<TypeReference> {
        let body = unwrap_parens(body);
        if body.kind() != "call_expression" {
            return None;
        }
        let callee = node_text(body.child_by_field_name("function")?, site.source);
        if !self.serializers.iter().any(|s| s == callee) {
            return None;
        }
        let arg = named_children(body.child_by_field_name("arguments")?)
            .into_iter()
            .next()
            .map(unwrap_parens)?;
        match arg.kind() {
            "identifier" => identifier_type(arg, site.source, site.imports),
            "as_expression" | "satisfies_expression" => {
                asserted_type(arg, site.source, site.imports)
            }
            _ => None,
        }
    }
}

/// Per-file context shared by every call site in the file.
struct CallSite<'a> {
    source: &'a [u8],
    imports: &'a ImportTable,
    base_path: Option<&'a str>,
    file: &'a str,
}

/// Literal text of the last top-level template declaration that has at least
/// one placeholder, e.g. `const API = \`${HOST}/api/v1\`` gives `/api/v1`.
fn base_path(root: Node<'_>, source: &[u8]) -> Option<String> {
    named_children(root)
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
        .filter(|d| d.kind() == "variable_declarator")
        .filter_map(|d| d.child_by_field_name("value"))
        .filter(|value| has_substitution(*value))
        .map(|value| template_text(value, source))
        .last()
}

/// Turn a call's URL text into a route: absolute URLs keep only their path,
/// relative ones are appended to the file's base path. One leading `/` is
/// removed.
pub(crate) fn resolve_path(raw_url: &str, base_path: Option<&str>) -> String {
    let joined = match url_path(raw_url) {
        Some(path) => path,
        None => {
            let joined = format!("{}{}", base_path.unwrap_or(""), raw_url);
            url_path(&joined).unwrap_or(joined)
        }
    };
    joined.strip_prefix('/').map(str::to_string).unwrap_or(joined)
}

fn url_path(text: &str) -> Option<String> {
    if !(text.starts_with("http://") || text.starts_with("https://")) {
        return None;
    }
    url::Url::parse(text).ok().map(|u| u.path().to_string())
}

/// The declared type the call's result is bound to.
fn response_body_type(call: Node<'_>, site: &CallSite<'_>) -> Option<TypeReference> {
    let mut value = call;
    while let Some(parent) = value.parent() {
        if matches!(parent.kind(), "await_expression" | "parenthesized_expression") {
            value = parent;
        } else {
            break;
        }
    }
    if let Some(declarator) = value.parent().filter(|p| p.kind() == "variable_declarator") {
        let is_initializer = declarator
            .child_by_field_name("value")
            .is_some_and(|v| v.id() == value.id());
        if is_initializer {
            if let Some(annotation) = declarator.child_by_field_name("type") {
                return reference_from_type(annotation, site.source, site.imports);
            }
        }
    }

    let mut scope = call.parent();
    while let Some(node) = scope {
        if is_function_like(node) {
            return node
                .child_by_field_name("return_type")
                .and_then(|t| reference_from_type(t, site.source, site.imports));
        }
        scope = node.parent();
    }
    None
}
