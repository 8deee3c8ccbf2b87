//! Web access policy CLI
//!
//! # Usage
//!
//! ```bash
//! # Print the resource schema
//! web-access-policy schema --format yaml
//!
//! # Validate a declaration before applying it
//! web-access-policy validate --config policy.yaml --strict
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - validation passed
//! - 1: Validation failed with errors
//! - 2: Validation passed with warnings
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 10: Internal error

mod cli;

use clap::Parser;

use access_policy_core::logging;
use cli::{Cli, ExitCode};

fn main() {
    let cli = Cli::parse();

    let provider = match cli.provider_config() {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("error: {:#}", err);
            std::process::exit(ExitCode::InvalidInput.into());
        }
    };

    if let Err(err) = logging::init(&provider) {
        eprintln!("warning: {}", err);
    }

    let exit_code = cli::run(cli, &provider);
    std::process::exit(exit_code.into());
}
