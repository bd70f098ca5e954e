//! Output formatters for tether command results.
//!
//! Provides two output modes:
//! - **Human** (default): numbered diagnostics with call-site locations
//! - **JSON** (`--json`): machine-readable structured output

pub mod human;
pub(crate) mod human_helpers;
pub mod json;

use tether_core::registry::TypeRegistry;
use tether_core::types::{CodeEndpoint, ContractEndpoint};
use tether_enforce::types::CheckResult;

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_endpoints(&self, endpoints: &[CodeEndpoint]) -> String;
    fn format_types(&self, registry: &TypeRegistry) -> String;
    fn format_contract(&self, endpoints: &[ContractEndpoint]) -> String;
}

/// Formatter for the `--json` flag.
pub fn formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(json::JsonFormatter)
    } else {
        Box::new(human::HumanFormatter)
    }
}
