//! passkeep entry point.
//!
//! Kept small on purpose. It only:
//!
//! - parses CLI arguments
//! - sets up logging
//! - dispatches the subcommand and maps failures to an exit status
//!
//! Command implementations live in `commands/`, terminal helpers in `ui.rs`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use passkeep::{cli, commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "passkeep=debug" } else { "passkeep=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.global.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
