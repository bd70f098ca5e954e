use serde_json::json;
use tether_core::registry::{TypeDefinition, TypeRegistry};
use tether_core::types::{CodeEndpoint, ContractEndpoint};
use tether_enforce::types::CheckResult;

use crate::OutputFormatter;

pub struct JsonFormatter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }

    fn format_endpoints(&self, endpoints: &[CodeEndpoint]) -> String {
        let doc = json!({
            "version": VERSION,
            "command": "endpoints",
            "endpoints": endpoints,
        });
        serde_json::to_string_pretty(&doc).unwrap_or_default()
    }

    fn format_types(&self, registry: &TypeRegistry) -> String {
        let types: Vec<&TypeDefinition> = registry.iter().collect();
        let doc = json!({
            "version": VERSION,
            "command": "types",
            "types": types,
        });
        serde_json::to_string_pretty(&doc).unwrap_or_default()
    }

    fn format_contract(&self, endpoints: &[ContractEndpoint]) -> String {
        let doc = json!({
            "version": VERSION,
            "command": "contract",
            "endpoints": endpoints,
        });
        serde_json::to_string_pretty(&doc).unwrap_or_default()
    }
}
