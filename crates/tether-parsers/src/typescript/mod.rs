//! TypeScript front end: type declarations and HTTP call sites.
//!
//! Both passes parse each source unit with tree-sitter, run the shared query
//! once, and fold the captured nodes into plain values. Units are processed
//! independently on rayon and merged back in input order.

mod declarations;
mod endpoints;
pub(crate) mod helpers;
mod imports;
mod scope;
mod type_refs;

pub use declarations::TypeRegistryBuilder;
pub use endpoints::EndpointExtractor;

use streaming_iterator::StreamingIterator;
use tether_core::types::{ParseWarning, SourceUnit};
use tree_sitter::{Node, QueryCursor, Tree};

use crate::queries::query_for_language;
use crate::treesitter::{grammar_for_path, ParseError, TreeSitterParser};

/// Nodes of interest in one parsed file, gathered from a single query pass.
#[derive(Default)]
pub(crate) struct Captures<'t> {
    pub interfaces: Vec<Node<'t>>,
    pub aliases: Vec<Node<'t>>,
    pub enums: Vec<Node<'t>>,
    pub calls: Vec<CallCapture<'t>>,
}

#[derive(Clone, Copy)]
pub(crate) struct CallCapture<'t> {
    pub call: Node<'t>,
    pub callee: Node<'t>,
    pub args: Node<'t>,
}

/// Parse one unit and collect its captures. The returned tree owns the nodes
/// that `collect` borrows, so callers parse first and collect second.
pub(crate) fn parse_unit(unit: &SourceUnit) -> Result<(Tree, &'static str), ParseError> {
    let lang = grammar_for_path(&unit.path);
    let mut parser = TreeSitterParser::new();
    let tree = parser.parse_source(lang, &unit.content)?;
    Ok((tree, lang))
}

pub(crate) fn collect_captures<'t>(
    lang: &str,
    root: Node<'t>,
    source: &[u8],
) -> Result<Captures<'t>, ParseError> {
    let query = query_for_language(lang)?;
    let capture_names = query.capture_names();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source);
    let mut captures = Captures::default();

    while let Some(m) = matches.next() {
        let mut call = None;
        let mut callee = None;
        let mut args = None;

        for cap in m.captures {
            match capture_names[cap.index as usize] {
                "decl.interface" => captures.interfaces.push(cap.node),
                "decl.alias" => captures.aliases.push(cap.node),
                "decl.enum" => captures.enums.push(cap.node),
                "call" => call = Some(cap.node),
                "call.callee" => callee = Some(cap.node),
                "call.args" => args = Some(cap.node),
                _ => {}
            }
        }

        if let (Some(call), Some(callee), Some(args)) = (call, callee, args) {
            captures.calls.push(CallCapture { call, callee, args });
        }
    }

    // Matches arrive grouped by pattern progress; source order keeps
    // discovery order stable.
    captures.calls.sort_by_key(|c| c.call.start_byte());
    Ok(captures)
}

/// Log and record a unit that could not be processed.
pub(crate) fn skipped_unit(unit: &SourceUnit, pass: &str, err: &ParseError) -> ParseWarning {
    tracing::warn!(file = %unit.path, pass, error = %err, "skipping source unit");
    ParseWarning::new(&unit.path, format!("skipped during {pass}: {err}"))
}
