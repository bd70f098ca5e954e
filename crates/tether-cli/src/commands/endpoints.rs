use std::path::PathBuf;

use tether_core::config::TetherConfig;
use tether_output::OutputFormatter;

use super::{extractor, load_units, print_output};

/// Run `tether endpoints` -- list the HTTP call sites found in code.
pub fn run(
    formatter: &dyn OutputFormatter,
    config: &TetherConfig,
    requests: PathBuf,
    targets: Vec<String>,
) -> i32 {
    let units = match load_units("endpoints", &requests, config) {
        Ok(u) => u,
        Err(code) => return code,
    };
    let endpoints = extractor(config, targets).extract(&units.output);
    print_output(&formatter.format_endpoints(&endpoints.output));
    0
}
