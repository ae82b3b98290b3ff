//! Display clustering as a pluggable capability.
//!
//! Cluster labels annotate profiles for visualization only; no scoring or
//! ranking logic reads them. The trait keeps the grouping algorithm
//! swappable and out of the core.

use thiserror::Error;

use crate::UserProfile;

/// Errors returned by [`Partitioner::partition`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    /// Zero clusters were requested.
    #[error("cluster count must be positive")]
    ZeroClusters,
    /// More clusters were requested than profiles exist.
    #[error("cannot split {available} profiles into {requested} clusters")]
    NotEnoughProfiles {
        /// Requested cluster count.
        requested: usize,
        /// Number of profiles available.
        available: usize,
    },
    /// An implementation returned the wrong number of labels.
    #[error("partitioner produced {actual} labels for {expected} profiles")]
    LabelCount {
        /// Expected label count (one per profile).
        expected: usize,
        /// Labels actually produced.
        actual: usize,
    },
}

/// Group profiles into `clusters` display groups.
///
/// Implementations must return exactly one label per profile, in profile
/// order, with every label in `0..clusters`. Exact assignments are not a
/// contract — callers may only rely on the label range and count.
/// Implementations must be `Send + Sync`.
pub trait Partitioner: Send + Sync {
    /// Produce one label per profile.
    ///
    /// # Errors
    /// Returns [`PartitionError`] when the request cannot be satisfied.
    fn partition(
        &self,
        profiles: &[UserProfile],
        clusters: usize,
    ) -> Result<Vec<u32>, PartitionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::profile;
    use rstest::rstest;

    struct SingleGroup;

    impl Partitioner for SingleGroup {
        fn partition(
            &self,
            profiles: &[UserProfile],
            clusters: usize,
        ) -> Result<Vec<u32>, PartitionError> {
            if clusters == 0 {
                return Err(PartitionError::ZeroClusters);
            }
            Ok(vec![0; profiles.len()])
        }
    }

    #[rstest]
    fn implementations_surface_zero_cluster_requests() {
        let profiles = vec![profile(1, 30, &["chess"])];
        let err = SingleGroup.partition(&profiles, 0).unwrap_err();
        assert_eq!(err, PartitionError::ZeroClusters);
    }

    #[rstest]
    fn labels_cover_every_profile() {
        let profiles = vec![profile(1, 30, &["chess"]), profile(2, 40, &["yoga"])];
        let labels = SingleGroup.partition(&profiles, 1).expect("partition");
        assert_eq!(labels.len(), profiles.len());
    }
}
