//! Facade crate for the Mingle matching engine.
//!
//! This crate re-exports the core domain types and exposes the scorer, data,
//! and HTTP server implementations behind feature flags.

#![forbid(unsafe_code)]

pub use mingle_core::{
    DEFAULT_EVENT_TOP_N, DEFAULT_USER_TOP_N, Eligibility, Event, EventError, MatchError,
    MatchResult, Matcher, PartitionError, Partitioner, ProfileStore, Scorer, StoreError,
    UserProfile, UserProfileError,
};

#[cfg(feature = "scorer")]
pub use mingle_scorer::{
    BehaviourSignal, FixedBehaviour, HybridScorer, KMeansPartitioner, ScoreWeights,
    UniformBehaviour, WeightsError,
};

#[cfg(feature = "data")]
pub use mingle_data::{GenerateError, Generator, LoadError, load_store};

#[cfg(feature = "server")]
pub use mingle_server::{ApiError, AppState, ServeError, build_router, serve};
