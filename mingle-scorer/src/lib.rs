//! Scoring implementations for the Mingle matching engine.
//!
//! The crate provides two complementary capabilities:
//! - **Request-time hybrid scoring** combines hobby overlap, location
//!   proximity, age similarity, and a stand-in behaviour signal into a single
//!   weighted compatibility score. [`HybridScorer`] implements the
//!   [`Scorer`](mingle_core::Scorer) trait so callers can plug it into the
//!   ranking pipeline, and keeps its stochastic term behind the injectable
//!   [`BehaviourSignal`] trait for deterministic tests.
//! - **Offline display clustering** groups the loaded population into a
//!   fixed number of clusters over `[age, lon, lat, hobby flags]` feature
//!   vectors. [`KMeansPartitioner`] implements the
//!   [`Partitioner`](mingle_core::Partitioner) trait; labels are
//!   display-only and carry no scoring contract.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use mingle_core::{Scorer, UserProfile};
//! use mingle_scorer::HybridScorer;
//!
//! # fn main() -> Result<(), mingle_core::UserProfileError> {
//! let target =
//!     UserProfile::new(0, "Ada", 30, Coord { x: 0.0, y: 0.0 }, ["chess", "hiking"])?;
//! let candidate =
//!     UserProfile::new(1, "Sam", 32, Coord { x: 0.1, y: 0.1 }, ["chess"])?.online(true);
//! let scorer = HybridScorer::seeded(7);
//! assert!(scorer.score(&target, &candidate).score().is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod cluster;
mod hybrid;
mod signal;
mod types;

pub use cluster::KMeansPartitioner;
pub use hybrid::HybridScorer;
pub use signal::{BehaviourSignal, FixedBehaviour, UniformBehaviour};
pub use types::{ScoreWeights, WeightsError};
