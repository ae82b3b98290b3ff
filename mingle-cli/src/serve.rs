//! The `serve` subcommand: load, cluster, and expose the HTTP API.
//!
//! Serve options merge CLI flags, configuration files, and `MINGLE_*`
//! environment variables; the dataset paths are the only required inputs.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use mingle_data::load_store;
use mingle_scorer::{HybridScorer, KMeansPartitioner};
use mingle_server::{AppState, serve};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::CliError;
use crate::generate::utf8_path;

pub(crate) const ARG_USERS: &str = "users";
pub(crate) const ARG_EVENTS: &str = "events";
pub(crate) const ENV_USERS: &str = "MINGLE_CMDS_SERVE_USERS";
pub(crate) const ENV_EVENTS: &str = "MINGLE_CMDS_SERVE_EVENTS";

const DEFAULT_CLUSTERS: usize = 5;
const DEFAULT_SEED: u64 = 42;

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Define the dataset inputs and listen address for the API. \
                 Values can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Load the datasets and serve the matching API"
)]
#[ortho_config(prefix = "MINGLE")]
pub(crate) struct ServeArgs {
    /// Path to the users CSV.
    #[arg(long = ARG_USERS, value_name = "path")]
    #[serde(default)]
    pub(crate) users: Option<PathBuf>,
    /// Path to the events CSV.
    #[arg(long = ARG_EVENTS, value_name = "path")]
    #[serde(default)]
    pub(crate) events: Option<PathBuf>,
    /// Listen address, e.g. 127.0.0.1:8000.
    #[arg(long, value_name = "addr")]
    #[serde(default)]
    pub(crate) bind: Option<SocketAddr>,
    /// Number of display clusters.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) clusters: Option<usize>,
    /// Seed for scoring and clustering.
    #[arg(long, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl ServeArgs {
    fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    pub(crate) users: PathBuf,
    pub(crate) events: PathBuf,
    pub(crate) bind: SocketAddr,
    pub(crate) clusters: usize,
    pub(crate) seed: u64,
}

impl ServeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.users, ARG_USERS)?;
        Self::require_existing(&self.events, ARG_EVENTS)?;
        Ok(())
    }

    fn require_existing(path: &Path, field: &'static str) -> Result<(), CliError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
    }
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let users = args.users.ok_or(CliError::MissingArgument {
            field: ARG_USERS,
            env: ENV_USERS,
        })?;
        let events = args.events.ok_or(CliError::MissingArgument {
            field: ARG_EVENTS,
            env: ENV_EVENTS,
        })?;
        let bind = args.bind.unwrap_or_else(default_bind);
        Ok(Self {
            users,
            events,
            bind,
            clusters: args.clusters.unwrap_or(DEFAULT_CLUSTERS),
            seed: args.seed.unwrap_or(DEFAULT_SEED),
        })
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

pub(crate) fn run(args: ServeArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    tracing_subscriber::fmt::init();

    let users_path = utf8_path(&config.users)?;
    let events_path = utf8_path(&config.events)?;
    let mut store = load_store(&users_path, &events_path)?;

    if store.user_count() >= config.clusters {
        store.assign_clusters(&KMeansPartitioner::seeded(config.seed), config.clusters)?;
    } else {
        tracing::warn!(
            "skipping clustering: {} profiles for {} clusters",
            store.user_count(),
            config.clusters
        );
    }

    let state = AppState::new(store, HybridScorer::seeded(config.seed));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| CliError::Runtime { source })?;
    runtime.block_on(serve(config.bind, state))?;
    Ok(())
}
