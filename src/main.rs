//! landing-crew: generate a landing page with a crew of agents.
//!
//! This is the main entry point for the `landing-crew` CLI. It parses
//! arguments, sets up logging, dispatches to the appropriate command handler,
//! and handles errors with proper exit codes.

mod cli;
mod commands;
pub mod agent;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
mod logging;
pub mod output;
pub mod pipeline;
pub mod sections;
pub mod topics;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match commands::dispatch(cli.command, &cli.config) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            tracing::debug!(exit_code = err.exit_code(), "command failed");
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
