//! The type registry: a name-indexed table of declared shapes.
//!
//! Built once per run from interface, alias, and enum declarations and never
//! mutated afterwards. Heritage (`extends`, intersections of named types) is
//! flattened at construction so lookups see the full property set.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::TypeReference;

/// Predefined TypeScript type keywords recorded as [`PropertyType::Primitive`].
pub const PREDEFINED_TYPES: &[&str] = &[
    "string",
    "number",
    "boolean",
    "any",
    "unknown",
    "void",
    "null",
    "undefined",
    "never",
    "symbol",
    "bigint",
];

const MAX_ALIAS_DEPTH: usize = 16;

/// Declaration kind of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Interface,
    Alias,
    Enum,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Interface => "interface",
            TypeKind::Alias => "alias",
            TypeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified type of a declared property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum PropertyType {
    /// A predefined keyword such as `string` or `any`.
    Primitive(String),
    /// `T[]` / `Array<T>`; holds the element text.
    ArrayOf(String),
    /// An anonymous inline object shape, or the `object` keyword.
    ObjectInline,
    /// Anything else, verbatim: a named type, a union, a literal type.
    Reference(String),
}

impl PropertyType {
    /// Classify a type from its source text. Used for alias targets written
    /// by hand and in tests; the tree-sitter front end classifies from nodes.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text == "object" || (text.starts_with('{') && text.ends_with('}')) {
            return PropertyType::ObjectInline;
        }
        if let Some(element) = text.strip_suffix("[]") {
            return PropertyType::ArrayOf(array_element(element));
        }
        if let Some(inner) = text
            .strip_prefix("Array<")
            .or_else(|| text.strip_prefix("ReadonlyArray<"))
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return PropertyType::ArrayOf(array_element(inner));
        }
        if PREDEFINED_TYPES.contains(&text) {
            return PropertyType::Primitive(text.to_string());
        }
        PropertyType::Reference(text.to_string())
    }

    /// True for `any`/`unknown`, which accept every example value.
    pub fn accepts_anything(&self) -> bool {
        matches!(self, PropertyType::Primitive(p) if p == "any" || p == "unknown")
    }

    /// Name to look up in the registry, if this type can name an entry.
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            PropertyType::Reference(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

fn array_element(text: &str) -> String {
    let text = text.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text)
        .trim();
    if text.starts_with('{') {
        "object".to_string()
    } else {
        text.to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Primitive(name) | PropertyType::Reference(name) => f.write_str(name),
            PropertyType::ArrayOf(element) => write!(f, "{element}[]"),
            PropertyType::ObjectInline => f.write_str("object"),
        }
    }
}

/// One property signature of an interface or object alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeProperty {
    pub ty: PropertyType,
    /// Declared with `?`.
    #[serde(default)]
    pub optional: bool,
}

impl TypeProperty {
    pub fn required(ty: PropertyType) -> Self {
        Self {
            ty,
            optional: false,
        }
    }

    pub fn optional(ty: PropertyType) -> Self {
        Self { ty, optional: true }
    }
}

/// A registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    /// Property name -> declared type. Non-object aliases carry a single
    /// synthetic `type` property holding the alias target.
    #[serde(default)]
    pub properties: IndexMap<String, TypeProperty>,
    /// Enum member name -> literal value (string literals unquoted, numbers
    /// as text). Literal-union aliases record each literal under its own value.
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub members: IndexMap<String, String>,
    /// Target of a non-object alias.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alias_of: Option<PropertyType>,
    /// Named parents whose properties are inherited.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extends: Vec<String>,
    /// File the declaration was found in.
    #[serde(default)]
    pub file: String,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            properties: IndexMap::new(),
            members: IndexMap::new(),
            alias_of: None,
            extends: Vec::new(),
            file: String::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, property: TypeProperty) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.members.insert(name.into(), value.into());
        self
    }

    /// Enums and literal-union aliases restrict values to a fixed set.
    pub fn is_enum_like(&self) -> bool {
        match self.kind {
            TypeKind::Enum => true,
            TypeKind::Alias => !self.members.is_empty(),
            TypeKind::Interface => false,
        }
    }

    pub fn enum_values(&self) -> Vec<&str> {
        self.members.values().map(String::as_str).collect()
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }
}

/// Immutable name -> definition table for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDefinition>,
}

impl TypeRegistry {
    /// Build a registry. The first definition of a name wins; heritage is
    /// flattened once every definition is known.
    pub fn from_definitions(definitions: impl IntoIterator<Item = TypeDefinition>) -> Self {
        let mut types: IndexMap<String, TypeDefinition> = IndexMap::new();
        for def in definitions {
            if let Some(existing) = types.get(&def.name) {
                tracing::debug!(
                    name = %def.name,
                    kept = %existing.file,
                    ignored = %def.file,
                    "duplicate type name; keeping first declaration"
                );
                continue;
            }
            types.insert(def.name.clone(), def);
        }

        let flattened: Vec<(String, IndexMap<String, TypeProperty>)> = types
            .values()
            .filter(|def| !def.extends.is_empty())
            .map(|def| {
                let mut visiting = vec![def.name.clone()];
                (def.name.clone(), flatten_properties(&types, def, &mut visiting))
            })
            .collect();
        for (name, properties) in flattened {
            if let Some(def) = types.get_mut(&name) {
                def.properties = properties;
            }
        }

        Self { types }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Resolve a reference by its bare name; array-ness is irrelevant here.
    pub fn resolve(&self, reference: &TypeReference) -> Option<&TypeDefinition> {
        self.get(&reference.name)
    }

    /// Resolve a type name that may carry one array marker (`User[]`).
    pub fn resolve_name(&self, name: &str) -> Option<&TypeDefinition> {
        let base = name.strip_suffix("[]").unwrap_or(name);
        self.get(base)
    }

    /// Follow non-object aliases until a type that is not such an alias is
    /// reached. Enum-like aliases are not followed so their value sets stay
    /// visible to callers.
    pub fn unalias(&self, ty: &PropertyType) -> PropertyType {
        let mut current = ty.clone();
        for _ in 0..MAX_ALIAS_DEPTH {
            let Some(def) = current.referenced_name().and_then(|name| self.get(name)) else {
                break;
            };
            if def.is_enum_like() {
                break;
            }
            match &def.alias_of {
                Some(target) => current = target.clone(),
                None => break,
            }
        }
        current
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }
}

fn flatten_properties(
    types: &IndexMap<String, TypeDefinition>,
    def: &TypeDefinition,
    visiting: &mut Vec<String>,
) -> IndexMap<String, TypeProperty> {
    let mut merged = IndexMap::new();
    for parent_name in &def.extends {
        if visiting.contains(parent_name) {
            continue;
        }
        let Some(parent) = types.get(parent_name) else {
            continue;
        };
        visiting.push(parent_name.clone());
        for (name, prop) in flatten_properties(types, parent, visiting) {
            merged.insert(name, prop);
        }
        visiting.pop();
    }
    for (name, prop) in &def.properties {
        merged.insert(name.clone(), prop.clone());
    }
    merged
}
