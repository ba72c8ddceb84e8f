//! The `tour` command-line front end.
//!
//! Loads the spots from the directory given by `--root`, applies one
//! subcommand through the intent handler and prints the resulting state,
//! errors and effect messages.

use clap::Parser;

mod cli;
use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Cli::parse().run().await
}
