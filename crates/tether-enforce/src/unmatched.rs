use serde_json::Value;
use tether_core::path::paths_match;
use tether_core::types::{CodeEndpoint, ContractEndpoint};

use crate::body_diff::json_kind;
use crate::types::{LintError, LintErrorKind};

pub(crate) fn endpoints_match(contract: &ContractEndpoint, code: &CodeEndpoint) -> bool {
    contract.method == code.method && paths_match(&contract.path, &code.path)
}

/// Call sites with no contract counterpart.
pub(crate) fn missing_in_contract(
    contract: &[ContractEndpoint],
    code: &[CodeEndpoint],
) -> Vec<LintError> {
    code.iter()
        .filter(|c| !contract.iter().any(|def| endpoints_match(def, c)))
        .map(|c| {
            let endpoint = format!("{} {}", c.method, c.path);
            LintError::new(
                LintErrorKind::EndpointMissingInContract,
                &endpoint,
                format!("Endpoint found in code but not defined in contract: {endpoint}"),
            )
            .at(&c.file, c.line)
        })
        .collect()
}

/// Contract endpoints no call site reaches, with the example shapes the
/// missing client code would need to send and accept.
pub(crate) fn missing_in_code(
    contract: &[ContractEndpoint],
    code: &[CodeEndpoint],
) -> Vec<LintError> {
    contract
        .iter()
        .filter(|def| !code.iter().any(|c| endpoints_match(def, c)))
        .map(|def| {
            let endpoint = format!("{} {}", def.method, def.path);
            let mut message = format!("Endpoint defined in contract but not found in code: {endpoint}");
            let request = def.request_body.as_ref().and_then(shape_of);
            let response = def.response_body.as_ref().and_then(shape_of);
            if let Some(shape) = &request {
                message.push_str(&format!(" with expected request body: {shape}"));
            }
            if let Some(shape) = &response {
                let joiner = if request.is_some() { "and" } else { "with" };
                message.push_str(&format!(" {joiner} expected response body: {shape}"));
            }
            LintError::new(LintErrorKind::EndpointMissingInCode, endpoint, message)
        })
        .collect()
}

/// `{ key: kind, ... }` for an object body (or an array body's first
/// element). Other bodies have no keys to describe.
fn shape_of(body: &Value) -> Option<String> {
    let object = match body {
        Value::Object(map) => map,
        Value::Array(items) => items.first()?.as_object()?,
        _ => return None,
    };
    if object.is_empty() {
        return None;
    }
    let fields: Vec<String> = object
        .iter()
        .map(|(key, value)| format!("{key}: {}", json_kind(value)))
        .collect();
    Some(format!("{{ {} }}", fields.join(", ")))
}
