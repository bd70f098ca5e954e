use tether_core::config::{EnforceConfig, TetherConfig};
use tether_core::registry::TypeRegistry;
use tether_core::types::{CodeEndpoint, ContractEndpoint};

use crate::body_diff::BodyCheck;
use crate::types::{BodySide, CheckResult, CheckSummary, LintError};
use crate::unmatched;

/// Compares contract endpoints against call sites and declared types.
///
/// Holds only its settings; every `check` is an independent pass over
/// immutable inputs.
#[derive(Debug, Clone)]
pub struct ConsistencyEngine {
    enforce: EnforceConfig,
    allow_missing_optional: bool,
}

impl Default for ConsistencyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsistencyEngine {
    pub fn new() -> Self {
        Self {
            enforce: EnforceConfig::default(),
            allow_missing_optional: false,
        }
    }

    /// Create an engine configured from a `TetherConfig`.
    pub fn with_config(config: &TetherConfig) -> Self {
        Self {
            enforce: config.enforce.clone(),
            allow_missing_optional: config.allow_missing_optional,
        }
    }

    /// Every discrepancy, in order: body checks per contract endpoint, then
    /// call sites unknown to the contract, then contract endpoints unknown
    /// to the code.
    pub fn check(
        &self,
        contract: &[ContractEndpoint],
        code: &[CodeEndpoint],
        types: &TypeRegistry,
    ) -> Vec<LintError> {
        let mut errors = Vec::new();

        for def in contract {
            let Some(call) = code.iter().find(|c| unmatched::endpoints_match(def, c)) else {
                continue;
            };
            errors.extend(self.check_bodies(def, call, types));
        }

        if self.enforce.unmatched_code {
            errors.extend(unmatched::missing_in_contract(contract, code));
        }
        if self.enforce.unmatched_contract {
            errors.extend(unmatched::missing_in_code(contract, code));
        }
        errors
    }

    /// `check` plus the counts formatters report.
    pub fn run(
        &self,
        contract: &[ContractEndpoint],
        code: &[CodeEndpoint],
        types: &TypeRegistry,
    ) -> CheckResult {
        let errors = self.check(contract, code, types);
        let matched = contract
            .iter()
            .filter(|def| code.iter().any(|c| unmatched::endpoints_match(def, c)))
            .count();
        let summary = CheckSummary {
            contract_endpoints: contract.len(),
            code_endpoints: code.len(),
            matched,
            types: types.len(),
        };
        tracing::info!(
            contract = summary.contract_endpoints,
            code = summary.code_endpoints,
            matched,
            errors = errors.len(),
            "check complete"
        );
        CheckResult::new(summary, errors)
    }

    fn check_bodies(
        &self,
        def: &ContractEndpoint,
        call: &CodeEndpoint,
        types: &TypeRegistry,
    ) -> Vec<LintError> {
        let endpoint = format!("{} {}", def.method, def.path);
        let label = if def.name.is_empty() { endpoint.as_str() } else { def.name.as_str() };
        let body_check = |side: BodySide| BodyCheck {
            side,
            label,
            endpoint: &endpoint,
            file: &call.file,
            line: call.line,
            registry: types,
            allow_missing_optional: self.allow_missing_optional,
        };

        let mut errors = Vec::new();
        if self.enforce.request_bodies {
            if let Some(example) = &def.request_body {
                errors.extend(
                    body_check(BodySide::Request).run(call.request_body_type.as_ref(), example),
                );
            }
        }
        if self.enforce.response_bodies {
            if let Some(example) = &def.response_body {
                errors.extend(
                    body_check(BodySide::Response).run(call.response_body_type.as_ref(), example),
                );
            }
        }
        tracing::debug!(endpoint = %endpoint, file = %call.file, line = call.line, errors = errors.len(), "bodies checked");
        errors
    }
}

/// Run a check with default settings.
pub fn check(
    contract: &[ContractEndpoint],
    code: &[CodeEndpoint],
    types: &TypeRegistry,
) -> Vec<LintError> {
    ConsistencyEngine::new().check(contract, code, types)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
