use std::fmt;

use serde::{Deserialize, Serialize};

/// A single source file handed to the parsers. Reading it from disk is the
/// caller's job; the parsers only ever see the in-memory text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Repo-relative or absolute path, used for language detection and diagnostics.
    pub path: String,
    pub content: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Where a referenced type name comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeOrigin {
    /// Declared (or at least not imported) in the file that uses it.
    Local,
    /// Bound by an import, a namespace qualifier, or an `import("...")` type.
    Imported { module: String },
}

/// A resolved reference to a named type, built once from type syntax.
///
/// `name` never carries array brackets or module qualifiers; the registry is
/// keyed by bare declaration names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    pub name: String,
    pub origin: TypeOrigin,
    pub is_array: bool,
}

impl TypeReference {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: TypeOrigin::Local,
            is_array: false,
        }
    }

    pub fn imported(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: TypeOrigin::Imported {
                module: module.into(),
            },
            is_array: false,
        }
    }

    pub fn into_array(mut self) -> Self {
        self.is_array = true;
        self
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// An HTTP call site recovered from client source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEndpoint {
    /// Uppercased HTTP verb, `GET` when the call does not say.
    pub method: String,
    /// Route with the leading slash stripped; not normalized.
    pub path: String,
    pub request_body_type: Option<TypeReference>,
    pub response_body_type: Option<TypeReference>,
    /// File containing the call.
    pub file: String,
    /// 1-based line of the call expression.
    pub line: u32,
}

impl CodeEndpoint {
    pub fn is_request_body_array(&self) -> bool {
        self.request_body_type.as_ref().is_some_and(|t| t.is_array)
    }

    pub fn is_response_body_array(&self) -> bool {
        self.response_body_type.as_ref().is_some_and(|t| t.is_array)
    }
}

/// An example request/response pair declared in the contract document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractEndpoint {
    /// Human label of the request item.
    pub name: String,
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub request_body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response_body: Option<serde_json::Value>,
}

/// A non-fatal problem with one input unit. The unit (or the affected field)
/// was skipped and the run continued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub file: String,
    pub message: String,
}

impl ParseWarning {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Output of a parsing pass together with the warnings it produced.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub output: T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Parsed<T> {
    pub fn new(output: T, warnings: Vec<ParseWarning>) -> Self {
        Self { output, warnings }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            output: f(self.output),
            warnings: self.warnings,
        }
    }
}
