use tether_core::registry::TypeRegistry;
use tether_core::types::{CodeEndpoint, ContractEndpoint};
use tether_enforce::types::CheckResult;

use crate::human_helpers::{format_definition_human, format_error_human, type_label};
use crate::OutputFormatter;

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        let mut out = String::new();

        for (i, e) in result.errors.iter().enumerate() {
            out.push_str(&format_error_human(i + 1, e));
        }
        for w in &result.warnings {
            out.push_str(&format!("warning: {w}\n"));
        }

        let s = &result.summary;
        if result.errors.is_empty() {
            out.push_str("No discrepancies found.\n");
        } else {
            out.push_str(&format!("\n{} discrepancy(ies) found\n", result.errors.len()));
        }
        out.push_str(&format!(
            "{} contract endpoint(s), {} code endpoint(s), {} matched, {} type(s)\n",
            s.contract_endpoints, s.code_endpoints, s.matched, s.types,
        ));
        out
    }

    fn format_endpoints(&self, endpoints: &[CodeEndpoint]) -> String {
        if endpoints.is_empty() {
            return "No endpoints found.\n".to_string();
        }
        let mut out = String::new();
        for ep in endpoints {
            out.push_str(&format!(
                "{:<7} {}\n    request: {}  response: {}\n    --> {}:{}\n",
                ep.method,
                ep.path,
                type_label(ep.request_body_type.as_ref()),
                type_label(ep.response_body_type.as_ref()),
                ep.file,
                ep.line,
            ));
        }
        out.push_str(&format!("\n{} endpoint(s)\n", endpoints.len()));
        out
    }

    fn format_types(&self, registry: &TypeRegistry) -> String {
        if registry.is_empty() {
            return "No types found.\n".to_string();
        }
        let mut out = String::new();
        for def in registry.iter() {
            out.push_str(&format_definition_human(def));
        }
        out.push_str(&format!("\n{} type(s)\n", registry.len()));
        out
    }

    fn format_contract(&self, endpoints: &[ContractEndpoint]) -> String {
        if endpoints.is_empty() {
            return "No contract endpoints found.\n".to_string();
        }
        let mut out = String::new();
        for ep in endpoints {
            let mut bodies = Vec::new();
            if ep.request_body.is_some() {
                bodies.push("request body");
            }
            if ep.response_body.is_some() {
                bodies.push("response body");
            }
            out.push_str(&format!("{:<7} {}  \"{}\"", ep.method, ep.path, ep.name));
            if !bodies.is_empty() {
                out.push_str(&format!("  [{}]", bodies.join(", ")));
            }
            out.push('\n');
        }
        out.push_str(&format!("\n{} endpoint(s)\n", endpoints.len()));
        out
    }
}
