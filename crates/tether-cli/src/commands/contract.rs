use std::path::PathBuf;

use tether_output::OutputFormatter;

use super::{load_contract, print_output};

/// Run `tether contract` -- list the endpoints a collection defines.
pub fn run(formatter: &dyn OutputFormatter, collection: PathBuf) -> i32 {
    let contract = match load_contract("contract", &collection) {
        Ok(c) => c,
        Err(code) => return code,
    };
    print_output(&formatter.format_contract(&contract.output));
    0
}
