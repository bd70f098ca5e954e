//! Structural comparison of one example body against its declared type.
//!
//! The declared type is the source of truth: a property it declares that the
//! example lacks is missing, a key the example has that it does not declare
//! is extra.

use serde_json::{Map, Value};
use tether_core::registry::{PropertyType, TypeDefinition, TypeRegistry};
use tether_core::types::TypeReference;

use crate::types::{BodySide, LintError, LintErrorKind, MismatchShape};

const MAX_UNWRAP_DEPTH: usize = 16;

/// Runtime kind of a JSON example value.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Context for checking one body of one matched endpoint pair.
pub(crate) struct BodyCheck<'a> {
    pub side: BodySide,
    /// Contract item name, used in messages.
    pub label: &'a str,
    /// `METHOD path` of the contract endpoint.
    pub endpoint: &'a str,
    pub file: &'a str,
    pub line: u32,
    pub registry: &'a TypeRegistry,
    pub allow_missing_optional: bool,
}

impl BodyCheck<'_> {
    pub fn run(&self, reference: Option<&TypeReference>, example: &Value) -> Vec<LintError> {
        let mut out = Vec::new();

        let Some(def) = reference.and_then(|r| self.registry.resolve(r)) else {
            let kind = match self.side {
                BodySide::Request => LintErrorKind::MissingRequestType,
                BodySide::Response => LintErrorKind::MissingResponseType,
            };
            let mut message = format!(
                "No matching {} type definition found for endpoint: {}",
                self.side, self.label
            );
            if let Some(r) = reference {
                message.push_str(&format!(" (type '{}' is not declared)", r.name));
            }
            out.push(self.error(kind, message));
            return out;
        };

        let body = match example {
            Value::Array(items) => match items.first() {
                Some(first) => first,
                None => return out,
            },
            other => other,
        };

        if def.is_enum_like() {
            self.check_value("", &PropertyType::Reference(def.name.clone()), body, &mut out);
            return out;
        }
        let target = self.object_target(&def.name);
        match (target, body) {
            (Some((shape, partial)), Value::Object(map)) => {
                self.diff_properties(shape, partial, map, &mut out)
            }
            (None, value) => {
                if let Some(ty) = &def.alias_of {
                    self.check_value("", ty, value, &mut out);
                }
            }
            (Some(_), other) => {
                let actual = json_kind(other);
                out.push(self.error(
                    LintErrorKind::TypeMismatch {
                        side: self.side,
                        shape: MismatchShape::Object,
                        property: String::new(),
                        expected: def.name.clone(),
                        actual: actual.to_string(),
                    },
                    format!(
                        "Type mismatch for {}. Expected an object of type {}, but got: {actual}",
                        self.subject(""),
                        def.name
                    ),
                ));
            }
        }
        out
    }

    /// `partial` marks every declared property optional, as `Partial<T>` does.
    fn diff_properties(
        &self,
        def: &TypeDefinition,
        partial: bool,
        example: &Map<String, Value>,
        out: &mut Vec<LintError>,
    ) {
        let expected: Vec<String> = def.properties.keys().cloned().collect();

        let missing: Vec<String> = def
            .properties
            .iter()
            .filter(|(name, prop)| {
                let optional = prop.optional || partial;
                !example.contains_key(name.as_str()) && !(optional && self.allow_missing_optional)
            })
            .map(|(name, _)| name.clone())
            .collect();
        if !missing.is_empty() {
            let message = format!(
                "Missing properties in {} body for endpoint {}: {}. Expected properties: {}",
                self.side,
                self.label,
                missing.join(", "),
                expected.join(", ")
            );
            out.push(self.error(
                LintErrorKind::MissingProperty {
                    side: self.side,
                    properties: missing,
                    expected: expected.clone(),
                },
                message,
            ));
        }

        let extra: Vec<String> = example
            .keys()
            .filter(|key| !def.properties.contains_key(key.as_str()))
            .cloned()
            .collect();
        if !extra.is_empty() {
            let message = format!(
                "Extra properties in {} body for endpoint {}: {}. Expected properties: {}",
                self.side,
                self.label,
                extra.join(", "),
                expected.join(", ")
            );
            out.push(self.error(
                LintErrorKind::ExtraProperty {
                    side: self.side,
                    properties: extra,
                    expected,
                },
                message,
            ));
        }

        for (name, prop) in &def.properties {
            if let Some(value) = example.get(name) {
                self.check_value(name, &prop.ty, value, out);
            }
        }
    }

    fn check_value(&self, property: &str, declared: &PropertyType, value: &Value, out: &mut Vec<LintError>) {
        let declared = self.registry.unalias(declared);
        if declared.accepts_anything() {
            return;
        }
        if let Some(def) = self.enum_like(&declared) {
            self.check_enum(property, def, value, out);
            return;
        }

        match value {
            Value::Array(items) => self.check_array(property, &declared, items, out),
            Value::Object(_) => {
                if !self.object_accepts(&declared) {
                    out.push(self.mismatch(
                        property,
                        MismatchShape::Object,
                        declared.to_string(),
                        "object",
                        format!("Expected {declared}, but got an object"),
                    ));
                }
            }
            scalar => {
                if !scalar_accepts(&declared.to_string(), scalar) {
                    let actual = json_kind(scalar);
                    out.push(self.mismatch(
                        property,
                        MismatchShape::Scalar,
                        declared.to_string(),
                        actual,
                        format!("Expected type: {declared}, Actual type: {actual}"),
                    ));
                }
            }
        }
    }

    fn enum_like(&self, ty: &PropertyType) -> Option<&TypeDefinition> {
        ty.referenced_name()
            .and_then(|name| self.registry.get(name))
            .filter(|def| def.is_enum_like())
    }

    /// Strings and numbers must be one of the values. Other kinds carry no
    /// value to compare and pass.
    fn check_enum(&self, property: &str, def: &TypeDefinition, value: &Value, out: &mut Vec<LintError>) {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return,
        };
        let values = def.enum_values();
        if values.contains(&text.as_str()) {
            return;
        }
        let expected: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let message = format!(
            "Invalid enum value for {}. Expected one of {}, but got: {text}",
            self.subject(property),
            expected.join(", ")
        );
        out.push(self.error(
            LintErrorKind::InvalidEnumValue {
                side: self.side,
                property: property.to_string(),
                value: text,
                expected,
            },
            message,
        ));
    }

    fn check_array(&self, property: &str, declared: &PropertyType, items: &[Value], out: &mut Vec<LintError>) {
        // `T[] | null` and similar unions are checked against their array alternative.
        let array_alternative = match declared {
            PropertyType::Reference(text) => union_alternatives(text)
                .into_iter()
                .map(|alt| self.registry.unalias(&PropertyType::parse(alt)))
                .find(|alt| matches!(alt, PropertyType::ArrayOf(_)) || alt.accepts_anything()),
            _ => None,
        };
        if array_alternative.as_ref().is_some_and(PropertyType::accepts_anything) {
            return;
        }
        let Some(PropertyType::ArrayOf(element)) = array_alternative.as_ref().or(Some(declared)) else {
            out.push(self.mismatch(
                property,
                MismatchShape::Array,
                declared.to_string(),
                "array",
                format!("Expected {declared}, but got an array"),
            ));
            return;
        };

        let element_ty = self.registry.unalias(&PropertyType::parse(element));
        let expected_kind = match &element_ty {
            t if t.accepts_anything() => return,
            PropertyType::Primitive(p) => p.as_str(),
            PropertyType::ObjectInline => "object",
            PropertyType::ArrayOf(_) => "array",
            PropertyType::Reference(_) => {
                self.check_reference_elements(property, element, &element_ty, items, out);
                return;
            }
        };

        let Some(first) = items.first() else {
            return;
        };
        let first_kind = json_kind(first);
        let actual = if items.iter().all(|item| json_kind(item) == first_kind) {
            first_kind
        } else {
            "mixed"
        };
        if actual != expected_kind {
            out.push(self.mismatch(
                property,
                MismatchShape::Array,
                format!("{expected_kind}[]"),
                actual,
                format!("Expected an array of {expected_kind}, but got an array of {actual}"),
            ));
        }
    }

    fn check_reference_elements(
        &self,
        property: &str,
        element: &str,
        element_ty: &PropertyType,
        items: &[Value],
        out: &mut Vec<LintError>,
    ) {
        if let Some(def) = self.enum_like(element_ty) {
            for item in items {
                let before = out.len();
                self.check_enum(property, def, item, out);
                if out.len() > before {
                    break;
                }
            }
            return;
        }

        let text = element_ty.to_string();
        if self.registry.resolve_name(base_name(&text)).is_some() {
            return;
        }
        // Literal unions such as `("a" | "b")[]` have no registry entry.
        if text.contains('|') {
            if let Some(bad) = items.iter().find(|item| !scalar_accepts(&text, item)) {
                let actual = json_kind(bad);
                out.push(self.mismatch(
                    property,
                    MismatchShape::Array,
                    format!("{text}[]"),
                    actual,
                    format!("Expected an array of {text}, but got an array containing {bad}"),
                ));
            }
            return;
        }

        out.push(self.error(
            LintErrorKind::ReferencedTypeNotFound {
                side: self.side,
                property: property.to_string(),
                type_name: element.to_string(),
            },
            format!("Referenced type '{element}' not found for {}.", self.subject(property)),
        ));
    }

    fn object_accepts(&self, declared: &PropertyType) -> bool {
        match declared {
            PropertyType::ObjectInline => true,
            PropertyType::Primitive(_) | PropertyType::ArrayOf(_) => declared.accepts_anything(),
            PropertyType::Reference(text) => text.split('|').map(str::trim).any(|alt| {
                matches!(alt, "object" | "any" | "unknown")
                    || alt.starts_with('{')
                    || matches!(base_name(alt), "Record" | "Map")
                    || self.object_target(alt).is_some()
            }),
        }
    }

    /// Object-shaped definition a type text stands for. Aliases are followed
    /// and generic wrappers the registry does not declare (`Partial<T>`,
    /// `Readonly<T>`, `ApiResponse<T>`) are unwrapped to their first argument.
    /// The flag is set when a `Partial` wrapper was crossed.
    fn object_target(&self, text: &str) -> Option<(&TypeDefinition, bool)> {
        let mut current = text.trim().to_string();
        let mut partial = false;
        for _ in 0..MAX_UNWRAP_DEPTH {
            if current.ends_with("[]") {
                return None;
            }
            let base = base_name(&current);
            if let Some(def) = self.registry.get(base) {
                if def.is_enum_like() {
                    return None;
                }
                match &def.alias_of {
                    Some(target) => current = target.to_string(),
                    None => return Some((def, partial)),
                }
                continue;
            }
            if base == "Partial" {
                partial = true;
            }
            current = first_type_argument(&current)?;
        }
        None
    }

    fn subject(&self, property: &str) -> String {
        if property.is_empty() {
            format!("{} body for endpoint {}", self.side, self.label)
        } else {
            format!("property '{property}' in {} body for endpoint {}", self.side, self.label)
        }
    }

    fn mismatch(
        &self,
        property: &str,
        shape: MismatchShape,
        expected: String,
        actual: &str,
        detail: String,
    ) -> LintError {
        let subject = match shape {
            MismatchShape::Array => format!("array {}", self.subject(property)),
            _ => self.subject(property),
        };
        self.error(
            LintErrorKind::TypeMismatch {
                side: self.side,
                shape,
                property: property.to_string(),
                expected,
                actual: actual.to_string(),
            },
            format!("Type mismatch for {subject}. {detail}"),
        )
    }

    fn error(&self, kind: LintErrorKind, message: String) -> LintError {
        LintError::new(kind, self.endpoint, message).at(self.file, self.line)
    }
}

/// Name without generic arguments: `Page<User>` -> `Page`.
fn base_name(text: &str) -> &str {
    text.split('<').next().unwrap_or(text).trim()
}

/// First argument of a generic type text: `Partial<Page<User>>` -> `Page<User>`.
fn first_type_argument(text: &str) -> Option<String> {
    let open = text.find('<')?;
    let inner = text.trim_end().strip_suffix('>')?.get(open + 1..)?;
    let mut depth = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(inner[..i].trim().to_string()),
            _ => {}
        }
    }
    let inner = inner.trim();
    (!inner.is_empty()).then(|| inner.to_string())
}

/// Top-level alternatives of a union type text. Bars nested in parentheses,
/// generics, or inline objects do not split.
fn union_alternatives(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

/// Whether a declared type text admits a scalar example value. Union
/// alternatives are tried one by one; literal alternatives compare by value.
fn scalar_accepts(declared: &str, value: &Value) -> bool {
    let kind = json_kind(value);
    declared
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split('|')
        .map(str::trim)
        .any(|alt| alt == kind || alt == "any" || alt == "unknown" || literal_matches(alt, value))
}

fn literal_matches(alternative: &str, value: &Value) -> bool {
    match value {
        Value::String(s) => {
            let quoted = |q: char| alternative.len() >= 2 && alternative.starts_with(q) && alternative.ends_with(q);
            (quoted('"') || quoted('\'')) && &alternative[1..alternative.len() - 1] == s
        }
        Value::Number(n) => alternative == n.to_string(),
        Value::Bool(b) => alternative == b.to_string(),
        _ => false,
    }
}
