//! The `generate` subcommand: write a synthetic dataset pair.

use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use clap::Parser;
use mingle_data::{Generator, write_events_csv, write_users_csv};

use crate::CliError;

const DEFAULT_USER_COUNT: u64 = 100;
const DEFAULT_EVENT_COUNT: u64 = 20;
const DEFAULT_SEED: u64 = 42;

/// CLI arguments for the `generate` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(about = "Write fake_users.csv and fake_events.csv for the demo")]
pub(crate) struct GenerateArgs {
    /// Output directory for the dataset pair.
    #[arg(long = "out-dir", value_name = "dir", default_value = "data")]
    pub(crate) out_dir: PathBuf,
    /// Number of user profiles to generate.
    #[arg(long, value_name = "count", default_value_t = DEFAULT_USER_COUNT)]
    pub(crate) users: u64,
    /// Number of events to generate.
    #[arg(long, value_name = "count", default_value_t = DEFAULT_EVENT_COUNT)]
    pub(crate) events: u64,
    /// Seed for reproducible output.
    #[arg(long, value_name = "seed", default_value_t = DEFAULT_SEED)]
    pub(crate) seed: u64,
}

pub(crate) fn run(args: &GenerateArgs) -> Result<(), CliError> {
    let out_dir = utf8_path(&args.out_dir)?;
    let users_path = out_dir.join("fake_users.csv");
    let events_path = out_dir.join("fake_events.csv");

    let mut generator = Generator::seeded(args.seed);
    let users = generator.users(args.users)?;
    let events = generator.events(&users, args.events)?;
    write_users_csv(&users_path, &users)?;
    write_events_csv(&events_path, &events)?;

    println!(
        "wrote {} users to {users_path} and {} events to {events_path}",
        users.len(),
        events.len()
    );
    Ok(())
}

/// Convert a CLI path into the UTF-8 form the data crate requires.
pub(crate) fn utf8_path(path: &Path) -> Result<Utf8PathBuf, CliError> {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .map_err(|rejected| CliError::NonUtf8Path { path: rejected })
}
