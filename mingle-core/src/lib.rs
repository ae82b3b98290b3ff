//! Core domain types and capability traits for the Mingle matching engine.
//!
//! The crate defines the in-memory profile and event models, the
//! [`ProfileStore`] context object that owns them for the process lifetime,
//! and the two ranking operations ([`Matcher::user_matches`] and
//! [`Matcher::event_matches`]). Scoring and clustering are capabilities
//! expressed as traits ([`Scorer`], [`Partitioner`]) so implementations can
//! live in sibling crates.
//!
//! Constructors return `Result` to surface invalid input early; after
//! construction the store is read-only apart from the one-time cluster-label
//! annotation used for display.

#![forbid(unsafe_code)]

mod event;
mod matcher;
mod partition;
mod profile;
mod scorer;
mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use event::{Event, EventError};
pub use matcher::{
    DEFAULT_EVENT_TOP_N, DEFAULT_USER_TOP_N, EVENT_HOBBY_SCORE, EVENT_OFF_HOBBY_SCORE, MatchError,
    MatchResult, Matcher,
};
pub use partition::{PartitionError, Partitioner};
pub use profile::{UserProfile, UserProfileError};
pub use scorer::{Eligibility, Scorer};
pub use store::{ProfileStore, StoreError};
