//! CLI error taxonomy.

use std::path::PathBuf;
use std::sync::Arc;

use mingle_core::{MatchError, PartitionError};
use mingle_data::{GenerateError, LoadError};
use mingle_server::ServeError;
use thiserror::Error;

/// Errors emitted by the Mingle CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing flag.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Name of the offending flag.
        field: &'static str,
        /// The path that failed the check.
        path: PathBuf,
    },
    /// A dataset path was not valid UTF-8.
    #[error("path {path:?} is not valid UTF-8")]
    NonUtf8Path {
        /// The rejected path.
        path: PathBuf,
    },
    /// Synthetic dataset generation failed.
    #[error("failed to generate datasets")]
    Generate(#[from] GenerateError),
    /// Loading the datasets failed.
    #[error("failed to load datasets")]
    Load(#[from] LoadError),
    /// Ranking failed, e.g. an unknown target id.
    #[error("failed to rank matches")]
    Match(#[from] MatchError),
    /// The display-clustering pass failed.
    #[error("failed to cluster profiles")]
    Cluster(#[from] PartitionError),
    /// Encoding results as JSON failed.
    #[error("failed to encode output")]
    Encode(#[from] serde_json::Error),
    /// The async runtime could not be started.
    #[error("failed to start the async runtime")]
    Runtime {
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server failed to bind or serve.
    #[error(transparent)]
    Serve(#[from] ServeError),
}
