//! tether CLI: contract-drift linting between a Postman collection and the
//! TypeScript code that calls the API.
//!
//! See `tether --help` for usage.

use clap::Parser;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter = tether_output::formatter(cli.json);
    let config = commands::load_config(cli.config_dir.as_deref());

    let exit_code = match cli.command {
        Commands::Check {
            requests,
            types,
            collection,
            targets,
        } => commands::check::run(&*formatter, &config, requests, types, collection, targets),
        Commands::Endpoints { requests, targets } => {
            commands::endpoints::run(&*formatter, &config, requests, targets)
        }
        Commands::Types { types } => commands::types::run(&*formatter, &config, types),
        Commands::Contract { collection } => commands::contract::run(&*formatter, collection),
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}

/// Log to stderr. `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    // A subscriber may already be installed when embedded; ignore that case.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
