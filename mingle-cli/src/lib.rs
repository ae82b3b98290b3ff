//! Command-line interface for the Mingle matching engine.
//!
//! Four subcommands cover the demo lifecycle: `generate` writes a synthetic
//! dataset pair, `match-users` and `match-events` rank from the command line,
//! and `serve` loads the datasets, runs the display-clustering pass, and
//! exposes the HTTP API.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod generate;
mod rank;
mod serve;

pub use error::CliError;

/// Run the Mingle CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] for argument, configuration, dataset, and server
/// failures; the binary prints the error chain and exits non-zero.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::MatchUsers(args) => rank::run_users(&args),
        Command::MatchEvents(args) => rank::run_events(&args),
        Command::Serve(args) => serve::run(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mingle",
    about = "Hobby-matching demo: generate data, rank matches, serve the API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a synthetic users/events dataset pair.
    Generate(generate::GenerateArgs),
    /// Rank user matches for a target user.
    MatchUsers(rank::RankArgs),
    /// Rank event matches for a target user.
    MatchEvents(rank::RankArgs),
    /// Load the datasets, cluster the population, and serve the HTTP API.
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests;
