//! Command-line interface for the fleetgeo vehicle inventory client.
#![forbid(unsafe_code)]

use clap::Parser;

mod commands;
mod connection;
mod error;

pub use error::CliError;

use commands::{Command, run_command};
use connection::ConnectionArgs;

const ARG_BASE_URL: &str = "base-url";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_BASE_URL: &str = "FLEETGEO_CMDS_CONNECTION_BASE_URL";

/// Run the fleetgeo CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// inventory service cannot be reached, or a query finds nothing.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let connection = cli.connection().into_config()?;
    let repository = connection.build_repository()?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &repository, &mut stdout)
}

#[derive(Debug, Parser)]
#[command(
    name = "fleetgeo",
    about = "Manage a remote vehicle inventory and run geographic queries against it",
    version
)]
struct Cli {
    /// Base URL of the inventory service (e.g. "http://localhost:8000").
    #[arg(long = ARG_BASE_URL, value_name = "url", global = true)]
    base_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs", global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Connection settings given on the command line, before layering.
    fn connection(&self) -> ConnectionArgs {
        ConnectionArgs {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests;
