//! Serde models for the parts of a Postman v2.x collection that tether reads.
//!
//! Every field is optional and unknown fields are ignored, so collections
//! exported by different Postman versions deserialize the same way.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct Collection {
    #[serde(default)]
    pub info: Option<Info>,
    /// Kept as raw values so a single malformed item can be skipped.
    pub item: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Info {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Item {
    #[serde(default)]
    pub name: Option<String>,
    /// Present on folders.
    #[serde(default)]
    pub item: Option<Vec<Value>>,
    /// Present on requests.
    #[serde(default)]
    pub request: Option<Request>,
    #[serde(default)]
    pub response: Vec<ExampleResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Request {
    /// Shorthand form: the request is just its URL.
    Url(String),
    Full(RequestDef),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestDef {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub body: Option<Body>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Url {
    Raw(String),
    Parts(UrlParts),
}

#[derive(Debug, Deserialize)]
pub(crate) struct UrlParts {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub path: Option<UrlPath>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UrlPath {
    Joined(String),
    Segments(Vec<PathSegment>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PathSegment {
    Text(String),
    Variable {
        #[serde(default)]
        value: Option<String>,
    },
}

impl PathSegment {
    pub fn as_str(&self) -> &str {
        match self {
            PathSegment::Text(text) => text,
            PathSegment::Variable { value } => value.as_deref().unwrap_or(""),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Body {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExampleResponse {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub body: Option<String>,
}
