use std::collections::HashMap;

use tree_sitter::Node;

use super::helpers::{named_children, string_value};
use crate::treesitter::node_text;

/// Local binding name -> module specifier, for one file.
///
/// Covers default, named (with or without `as`), and namespace imports.
/// `import type` statements bind names the same way.
#[derive(Debug, Default)]
pub(crate) struct ImportTable {
    bindings: HashMap<String, String>,
}

impl ImportTable {
    pub fn from_root(root: Node<'_>, source: &[u8]) -> Self {
        let mut table = Self::default();
        for stmt in named_children(root) {
            if stmt.kind() != "import_statement" {
                continue;
            }
            let Some(module) = stmt
                .child_by_field_name("source")
                .and_then(|s| string_value(s, source))
            else {
                continue;
            };
            for child in named_children(stmt) {
                if child.kind() == "import_clause" {
                    table.collect_clause(child, &module, source);
                }
            }
        }
        table
    }

    fn collect_clause(&mut self, clause: Node<'_>, module: &str, source: &[u8]) {
        for part in named_children(clause) {
            match part.kind() {
                "identifier" => self.bind(node_text(part, source), module),
                "namespace_import" => {
                    if let Some(ident) = named_children(part)
                        .into_iter()
                        .find(|n| n.kind() == "identifier")
                    {
                        self.bind(node_text(ident, source), module);
                    }
                }
                "named_imports" => {
                    for spec in named_children(part) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        let local = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(local) = local {
                            self.bind(node_text(local, source), module);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn bind(&mut self, local: &str, module: &str) {
        self.bindings.insert(local.to_string(), module.to_string());
    }

    /// Module a local name was imported from.
    pub fn module_of(&self, local: &str) -> Option<&str> {
        self.bindings.get(local).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
