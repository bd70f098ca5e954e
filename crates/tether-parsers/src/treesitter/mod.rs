use std::path::Path;

use tree_sitter::{Language, Node, Parser, Tree};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&mut self, lang_name: &str, source: &[u8]) -> Result<Tree, ParseError> {
        let lang = language_for_name(lang_name)?;
        self.parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        self.parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)
    }

    /// Parse a whole source file, rejecting trees that contain syntax errors.
    pub fn parse_source(&mut self, lang_name: &str, source: &str) -> Result<Tree, ParseError> {
        let tree = self.parse(lang_name, source.as_bytes())?;
        if let Some(node) = first_error(tree.root_node()) {
            let pos = node.start_position();
            return Err(ParseError::Syntax {
                line: pos.row as u32 + 1,
                column: pos.column as u32 + 1,
            });
        }
        Ok(tree)
    }
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("language error: {0}")]
    Language(String),
    #[error("query error: {0}")]
    Query(String),
    #[error("parse failed")]
    ParseFailed,
    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: u32, column: u32 },
}

pub(crate) fn language_for_name(name: &str) -> Result<Language, ParseError> {
    match name {
        "typescript" | "javascript" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        other => Err(ParseError::UnsupportedLanguage(other.to_string())),
    }
}

/// Grammar used for an in-memory source unit. Paths with unknown extensions
/// are treated as TypeScript.
pub fn grammar_for_path(path: &str) -> &'static str {
    detect_language(Path::new(path)).unwrap_or("typescript")
}

/// Grammar name for a source path, by extension.
pub fn detect_language(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "ts" | "mts" | "cts" => Some("typescript"),
        "tsx" => Some("tsx"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("tsx"),
        _ => None,
    }
}

pub(crate) fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    source
        .get(node.start_byte()..node.end_byte())
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .unwrap_or("")
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error).or(Some(node))
}
