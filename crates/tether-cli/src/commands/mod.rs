pub mod check;
pub mod completion;
pub mod contract;
pub mod endpoints;
pub mod types;

use std::path::Path;

use tether_core::config::TetherConfig;
use tether_core::types::{ContractEndpoint, Parsed, SourceUnit};
use tether_parsers::contract::ContractLoader;
use tether_parsers::typescript::EndpointExtractor;
use tether_parsers::walker::{load_sources, FileWalker};

/// Configuration from `--config-dir`, else the current directory.
pub fn load_config(dir: Option<&Path>) -> TetherConfig {
    match dir {
        Some(d) => TetherConfig::load(d),
        None => match std::env::current_dir() {
            Ok(cwd) => TetherConfig::load(&cwd),
            Err(_) => TetherConfig::default(),
        },
    }
}

/// Walk `dir` and read every supported source file.
pub fn load_units(
    cmd: &str,
    dir: &Path,
    config: &TetherConfig,
) -> Result<Parsed<Vec<SourceUnit>>, i32> {
    if !dir.is_dir() {
        eprintln!("tether {cmd}: directory not found: {}", dir.display());
        return Err(2);
    }
    let entries = FileWalker::new(dir)
        .with_ignore_patterns(&config.ignore_patterns)
        .walk();
    tracing::debug!(dir = %dir.display(), files = entries.len(), "discovered sources");
    Ok(load_sources(&entries))
}

pub fn load_contract(cmd: &str, path: &Path) -> Result<Parsed<Vec<ContractEndpoint>>, i32> {
    ContractLoader::load_file(path).map_err(|e| {
        eprintln!("tether {cmd}: {e}");
        2
    })
}

/// Extractor honouring `--target` over `call_targets` from config.
pub fn extractor(config: &TetherConfig, targets: Vec<String>) -> EndpointExtractor {
    let call_targets = if targets.is_empty() {
        config.call_targets.clone()
    } else {
        targets
    };
    EndpointExtractor::new(call_targets, config.serializers.clone())
}

/// Print a rendered report, keeping a single trailing newline.
pub fn print_output(out: &str) {
    if out.is_empty() {
        return;
    }
    if out.ends_with('\n') {
        print!("{out}");
    } else {
        println!("{out}");
    }
}

pub fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(x), Ok(y)) => x == y,
        _ => a == b,
    }
}
