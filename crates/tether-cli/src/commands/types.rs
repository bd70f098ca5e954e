use std::path::PathBuf;

use tether_core::config::TetherConfig;
use tether_output::OutputFormatter;
use tether_parsers::typescript::TypeRegistryBuilder;

use super::{load_units, print_output};

/// Run `tether types` -- list the declared types the registry knows about.
pub fn run(formatter: &dyn OutputFormatter, config: &TetherConfig, types: PathBuf) -> i32 {
    let units = match load_units("types", &types, config) {
        Ok(u) => u,
        Err(code) => return code,
    };
    let registry = TypeRegistryBuilder::new().build(&units.output);
    print_output(&formatter.format_types(&registry.output));
    0
}
