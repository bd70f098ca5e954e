use std::path::PathBuf;

use tether_core::config::TetherConfig;
use tether_enforce::ConsistencyEngine;
use tether_output::OutputFormatter;
use tether_parsers::typescript::TypeRegistryBuilder;

use super::{extractor, load_contract, load_units, print_output, same_dir};

/// Run `tether check` -- compare the collection against call sites and types.
///
/// Exit codes: 0 clean, 1 discrepancies found, 2 fatal input error.
pub fn run(
    formatter: &dyn OutputFormatter,
    config: &TetherConfig,
    requests: PathBuf,
    types: Option<PathBuf>,
    collection: PathBuf,
    targets: Vec<String>,
) -> i32 {
    let contract = match load_contract("check", &collection) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let request_units = match load_units("check", &requests, config) {
        Ok(u) => u,
        Err(code) => return code,
    };

    let mut warnings = contract.warnings;
    warnings.extend(request_units.warnings);

    // One read when both roles share a directory.
    let types_dir = types.unwrap_or_else(|| requests.clone());
    let registry = if same_dir(&types_dir, &requests) {
        TypeRegistryBuilder::new().build(&request_units.output)
    } else {
        let type_units = match load_units("check", &types_dir, config) {
            Ok(u) => u,
            Err(code) => return code,
        };
        warnings.extend(type_units.warnings);
        TypeRegistryBuilder::new().build(&type_units.output)
    };
    warnings.extend(registry.warnings);

    let code = extractor(config, targets).extract(&request_units.output);
    warnings.extend(code.warnings);

    let result = ConsistencyEngine::with_config(config)
        .run(&contract.output, &code.output, &registry.output)
        .with_warnings(warnings);

    print_output(&formatter.format_check(&result));
    if result.is_clean() {
        0
    } else {
        1
    }
}
