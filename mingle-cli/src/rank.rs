//! The `match-users` and `match-events` subcommands: rank from the shell.

use std::path::PathBuf;

use clap::Parser;
use mingle_core::{DEFAULT_EVENT_TOP_N, DEFAULT_USER_TOP_N, Matcher};
use mingle_data::load_store;
use mingle_scorer::HybridScorer;
use mingle_server::views::{EventMatchView, UserMatchView};

use crate::CliError;
use crate::generate::utf8_path;

const DEFAULT_SEED: u64 = 42;

/// CLI arguments shared by the ranking subcommands.
#[derive(Debug, Clone, Parser)]
pub(crate) struct RankArgs {
    /// Path to the users CSV.
    #[arg(long, value_name = "path", default_value = "data/fake_users.csv")]
    pub(crate) users: PathBuf,
    /// Path to the events CSV.
    #[arg(long, value_name = "path", default_value = "data/fake_events.csv")]
    pub(crate) events: PathBuf,
    /// Target user id.
    #[arg(long = "user", value_name = "id")]
    pub(crate) user_id: u64,
    /// Maximum number of results (defaults to 10 users / 5 events).
    #[arg(long = "top-n", value_name = "count")]
    pub(crate) top_n: Option<usize>,
    /// Seed for the behaviour signal.
    #[arg(long, value_name = "seed", default_value_t = DEFAULT_SEED)]
    pub(crate) seed: u64,
}

pub(crate) fn run_users(args: &RankArgs) -> Result<(), CliError> {
    let store = load(args)?;
    let scorer = HybridScorer::seeded(args.seed);
    let matcher = Matcher::new(&store, &scorer);
    let matches = matcher.user_matches(args.user_id, args.top_n.unwrap_or(DEFAULT_USER_TOP_N))?;
    let views: Vec<UserMatchView> = matches.iter().map(UserMatchView::from).collect();
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}

pub(crate) fn run_events(args: &RankArgs) -> Result<(), CliError> {
    let store = load(args)?;
    let scorer = HybridScorer::seeded(args.seed);
    let matcher = Matcher::new(&store, &scorer);
    let matches = matcher.event_matches(args.user_id, args.top_n.unwrap_or(DEFAULT_EVENT_TOP_N))?;
    let views: Vec<EventMatchView> = matches.iter().map(EventMatchView::from).collect();
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}

fn load(args: &RankArgs) -> Result<mingle_core::ProfileStore, CliError> {
    let users_path = utf8_path(&args.users)?;
    let events_path = utf8_path(&args.events)?;
    Ok(load_store(&users_path, &events_path)?)
}
