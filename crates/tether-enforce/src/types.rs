use std::fmt;

use serde::{Deserialize, Serialize};
use tether_core::types::ParseWarning;

/// Which example body a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    Request,
    Response,
}

impl BodySide {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodySide::Request => "request",
            BodySide::Response => "response",
        }
    }
}

impl fmt::Display for BodySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the example value involved in a type mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchShape {
    Scalar,
    Array,
    Object,
}

/// Structured classification of a lint error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintErrorKind {
    MissingRequestType,
    MissingResponseType,
    MissingProperty {
        side: BodySide,
        properties: Vec<String>,
        expected: Vec<String>,
    },
    ExtraProperty {
        side: BodySide,
        properties: Vec<String>,
        expected: Vec<String>,
    },
    InvalidEnumValue {
        side: BodySide,
        property: String,
        value: String,
        expected: Vec<String>,
    },
    TypeMismatch {
        side: BodySide,
        shape: MismatchShape,
        /// Empty when the whole body is mismatched.
        property: String,
        expected: String,
        actual: String,
    },
    ReferencedTypeNotFound {
        side: BodySide,
        property: String,
        type_name: String,
    },
    EndpointMissingInContract,
    EndpointMissingInCode,
}

impl LintErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            LintErrorKind::MissingRequestType => "E001",
            LintErrorKind::MissingResponseType => "E002",
            LintErrorKind::MissingProperty { .. } => "E003",
            LintErrorKind::ExtraProperty { .. } => "E004",
            LintErrorKind::InvalidEnumValue { .. } => "E005",
            LintErrorKind::TypeMismatch { .. } => "E006",
            LintErrorKind::ReferencedTypeNotFound { .. } => "E007",
            LintErrorKind::EndpointMissingInContract => "E008",
            LintErrorKind::EndpointMissingInCode => "E009",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            LintErrorKind::MissingRequestType => "missing_request_type",
            LintErrorKind::MissingResponseType => "missing_response_type",
            LintErrorKind::MissingProperty { .. } => "missing_property",
            LintErrorKind::ExtraProperty { .. } => "extra_property",
            LintErrorKind::InvalidEnumValue { .. } => "invalid_enum_value",
            LintErrorKind::TypeMismatch { .. } => "type_mismatch",
            LintErrorKind::ReferencedTypeNotFound { .. } => "referenced_type_not_found",
            LintErrorKind::EndpointMissingInContract => "endpoint_missing_in_contract",
            LintErrorKind::EndpointMissingInCode => "endpoint_missing_in_code",
        }
    }
}

/// One discrepancy between contract and code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintError {
    pub code: String,
    pub kind: LintErrorKind,
    /// `METHOD path` of the endpoint concerned, as written on its side.
    pub endpoint: String,
    pub message: String,
    /// Call site, when the error can point at one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line: Option<u32>,
}

impl LintError {
    pub fn new(kind: LintErrorKind, endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: kind.code().to_string(),
            kind,
            endpoint: endpoint.into(),
            message: message.into(),
            file: None,
            line: None,
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Flat, human-readable rendering of a run's errors.
pub fn messages(errors: &[LintError]) -> Vec<String> {
    errors.iter().map(|e| e.message.clone()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub contract_endpoints: usize,
    pub code_endpoints: usize,
    /// Contract endpoints that found a call site.
    pub matched: usize,
    pub types: usize,
}

/// Everything a formatter needs to report one `check` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error"
    pub summary: CheckSummary,
    pub errors: Vec<LintError>,
    pub warnings: Vec<ParseWarning>,
}

impl CheckResult {
    pub fn new(summary: CheckSummary, errors: Vec<LintError>) -> Self {
        let status = if errors.is_empty() { "ok" } else { "error" };
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: status.to_string(),
            summary,
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<ParseWarning>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        messages(&self.errors)
    }
}
