//! Contract loading: flattens a Postman collection into [`ContractEndpoint`]s.
//!
//! Only the document as a whole can fail. Bodies that do not decode and items
//! with an unexpected shape become [`ParseWarning`]s and loading continues.

mod postman;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tether_core::types::{ContractEndpoint, ParseWarning, Parsed};

use postman::{Collection, ExampleResponse, Item, Request, RequestDef, Url, UrlPath};

/// Fatal contract conditions.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("cannot read contract {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("contract is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("contract is not a collection: {0}")]
    NotACollection(String),
}

/// Flattens a collection's item tree in document order.
#[derive(Debug, Clone)]
pub struct ContractLoader {
    source: String,
}

impl Default for ContractLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractLoader {
    pub fn new() -> Self {
        Self {
            source: "<collection>".to_string(),
        }
    }

    /// Label used as the `file` of any warnings.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn load_file(path: &Path) -> Result<Parsed<Vec<ContractEndpoint>>, ContractError> {
        let text = std::fs::read_to_string(path).map_err(|source| ContractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new()
            .with_source(path.display().to_string())
            .load_str(&text)
    }

    pub fn load_str(&self, text: &str) -> Result<Parsed<Vec<ContractEndpoint>>, ContractError> {
        let document: Value = serde_json::from_str(text)?;
        self.load(&document)
    }

    pub fn load(&self, document: &Value) -> Result<Parsed<Vec<ContractEndpoint>>, ContractError> {
        let collection = Collection::deserialize_from(document)?;
        if let Some(name) = collection.info.as_ref().and_then(|i| i.name.as_deref()) {
            tracing::debug!(collection = name, "loading contract");
        }

        let mut endpoints = Vec::new();
        let mut warnings = Vec::new();
        self.flatten(&collection.item, &mut endpoints, &mut warnings);
        tracing::debug!(endpoints = endpoints.len(), "contract flattened");
        Ok(Parsed::new(endpoints, warnings))
    }

    fn flatten(
        &self,
        items: &[Value],
        endpoints: &mut Vec<ContractEndpoint>,
        warnings: &mut Vec<ParseWarning>,
    ) {
        for (index, raw) in items.iter().enumerate() {
            let item = match Item::deserialize(raw) {
                Ok(item) => item,
                Err(e) => {
                    warnings.push(self.warn(format!("item #{index} has an unexpected shape: {e}")));
                    continue;
                }
            };
            let name = item.name.clone().unwrap_or_default();

            if let Some(children) = &item.item {
                self.flatten(children, endpoints, warnings);
            } else if let Some(request) = &item.request {
                endpoints.push(self.endpoint(&name, request, &item.response, warnings));
            } else {
                warnings.push(self.warn(format!(
                    "item '{name}' is neither a folder nor a request; skipped"
                )));
            }
        }
    }

    fn endpoint(
        &self,
        name: &str,
        request: &Request,
        responses: &[ExampleResponse],
        warnings: &mut Vec<ParseWarning>,
    ) -> ContractEndpoint {
        let (method, path, request_body) = match request {
            Request::Url(raw) => ("GET".to_string(), path_from_raw(raw), None),
            Request::Full(def) => (
                def.method
                    .as_deref()
                    .map(str::to_uppercase)
                    .unwrap_or_else(|| "GET".to_string()),
                def.url.as_ref().map(url_path).unwrap_or_default(),
                self.request_body(name, def, warnings),
            ),
        };

        ContractEndpoint {
            name: name.to_string(),
            method,
            path,
            request_body,
            response_body: self.response_body(name, responses, warnings),
        }
    }

    fn request_body(
        &self,
        name: &str,
        def: &RequestDef,
        warnings: &mut Vec<ParseWarning>,
    ) -> Option<Value> {
        let body = def.body.as_ref()?;
        if body.mode.as_deref() != Some("raw") {
            return None;
        }
        self.decode(name, "request body", body.raw.as_deref()?, warnings)
    }

    fn response_body(
        &self,
        name: &str,
        responses: &[ExampleResponse],
        warnings: &mut Vec<ParseWarning>,
    ) -> Option<Value> {
        let has_body = |r: &&ExampleResponse| r.body.as_deref().is_some_and(|b| !b.trim().is_empty());
        let chosen = responses
            .iter()
            .filter(has_body)
            .find(|r| matches!(r.code, Some(200) | Some(201)))
            .or_else(|| responses.iter().find(has_body))?;
        self.decode(name, "response body", chosen.body.as_deref()?, warnings)
    }

    fn decode(
        &self,
        name: &str,
        what: &str,
        text: &str,
        warnings: &mut Vec<ParseWarning>,
    ) -> Option<Value> {
        if text.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(text) {
            Ok(value) => Some(value),
            Err(e) => {
                warnings.push(self.warn(format!("{what} of '{name}' is not valid JSON: {e}")));
                None
            }
        }
    }

    fn warn(&self, message: String) -> ParseWarning {
        tracing::warn!(contract = %self.source, "{message}");
        ParseWarning::new(&self.source, message)
    }
}

impl Collection {
    fn deserialize_from(document: &Value) -> Result<Self, ContractError> {
        if !document.get("item").is_some_and(Value::is_array) {
            return Err(ContractError::NotACollection(
                "missing top-level `item` array".to_string(),
            ));
        }
        Self::deserialize(document)
            .map_err(|e| ContractError::NotACollection(e.to_string()))
    }
}

fn url_path(url: &Url) -> String {
    match url {
        Url::Raw(raw) => path_from_raw(raw),
        Url::Parts(parts) => match (&parts.path, &parts.raw) {
            (Some(UrlPath::Segments(segments)), _) => strip_leading_slash(
                &segments
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join("/"),
            ),
            (Some(UrlPath::Joined(path)), _) => strip_leading_slash(path),
            (None, Some(raw)) => path_from_raw(raw),
            (None, None) => String::new(),
        },
    }
}

/// Route part of a raw Postman URL: scheme and host, or a leading
/// `{{variable}}` host segment, are dropped along with query and fragment.
pub(crate) fn path_from_raw(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw.split('#').next().unwrap_or_default();
    let raw = raw.split('?').next().unwrap_or_default();

    if raw.starts_with("http://") || raw.starts_with("https://") {
        if let Ok(url) = url::Url::parse(raw) {
            return strip_leading_slash(url.path());
        }
    }

    let rest = if let Some(after_scheme) = raw.find("://").map(|i| &raw[i + 3..]) {
        after_scheme.find('/').map_or("", |i| &after_scheme[i..])
    } else if raw.starts_with("{{") {
        match raw.find("}}") {
            Some(end) => {
                let after = &raw[end + 2..];
                after.find('/').map_or("", |i| &after[i..])
            }
            None => raw,
        }
    } else {
        raw
    };
    strip_leading_slash(rest)
}

fn strip_leading_slash(path: &str) -> String {
    path.strip_prefix('/').unwrap_or(path).to_string()
}
