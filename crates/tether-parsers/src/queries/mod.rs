use std::sync::OnceLock;

use tree_sitter::Query;

use crate::treesitter::{language_for_name, ParseError};

pub const TYPESCRIPT_QUERIES: &str = include_str!("typescript.scm");

static TYPESCRIPT_QUERY: OnceLock<Result<Query, String>> = OnceLock::new();
static TSX_QUERY: OnceLock<Result<Query, String>> = OnceLock::new();

/// Compiles (once per grammar) the declaration and call-site query.
///
/// TS and TSX are distinct grammars with distinct node ids, so each gets its
/// own compiled query.
pub fn query_for_language(lang_name: &str) -> Result<&'static Query, ParseError> {
    let cell = match lang_name {
        "typescript" | "javascript" => &TYPESCRIPT_QUERY,
        "tsx" => &TSX_QUERY,
        other => return Err(ParseError::UnsupportedLanguage(other.to_string())),
    };
    cell.get_or_init(|| {
        let lang = language_for_name(lang_name).map_err(|e| e.to_string())?;
        Query::new(&lang, TYPESCRIPT_QUERIES)
            .map_err(|e| format!("query compilation error for {lang_name}: {e}"))
    })
    .as_ref()
    .map_err(|e| ParseError::Query(e.clone()))
}
