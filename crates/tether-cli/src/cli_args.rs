use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tether", version, about = "Detect drift between an API contract and the code that calls it")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Directory holding tether.json (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Compare a Postman collection against the code that calls the API
    Check {
        /// Directory of source files making HTTP calls
        #[arg(long, value_name = "DIR")]
        requests: PathBuf,
        /// Directory of type declarations (defaults to --requests)
        #[arg(long, value_name = "DIR")]
        types: Option<PathBuf>,
        /// Postman collection file
        #[arg(long, value_name = "FILE")]
        collection: PathBuf,
        /// Callee substring marking an HTTP call (repeatable; overrides config)
        #[arg(long = "target", value_name = "NAME")]
        targets: Vec<String>,
    },

    /// List HTTP call sites found in code
    Endpoints {
        /// Directory of source files making HTTP calls
        #[arg(long, value_name = "DIR")]
        requests: PathBuf,
        /// Callee substring marking an HTTP call (repeatable; overrides config)
        #[arg(long = "target", value_name = "NAME")]
        targets: Vec<String>,
    },

    /// List declared types
    Types {
        /// Directory of type declarations
        #[arg(long, value_name = "DIR")]
        types: PathBuf,
    },

    /// List endpoints defined in a Postman collection
    Contract {
        /// Postman collection file
        #[arg(long, value_name = "FILE")]
        collection: PathBuf,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell type: bash, zsh, fish, elvish, powershell
        shell: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
