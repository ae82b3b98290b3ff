//! The in-memory table of profiles and events.
//!
//! A [`ProfileStore`] is built once at startup from the loaded datasets and
//! passed by reference to everything that needs it. There is no ambient
//! global state: construction validates referential integrity, and the only
//! mutation after load is the one-time cluster-label annotation.

use std::collections::HashMap;

use thiserror::Error;

use crate::{Event, PartitionError, Partitioner, UserProfile};

/// Read-only context object holding the user and event tables.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use mingle_core::{ProfileStore, UserProfile};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let user = UserProfile::new(0, "Ada", 34, Coord { x: 0.0, y: 0.0 }, ["chess"])?;
/// let store = ProfileStore::new(vec![user], Vec::new())?;
/// assert!(store.user(0).is_some());
/// assert!(store.user(99).is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProfileStore {
    users: Vec<UserProfile>,
    events: Vec<Event>,
    by_id: HashMap<u64, usize>,
}

/// Errors returned by [`ProfileStore::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Two profiles shared the same id.
    #[error("duplicate user id {id}")]
    DuplicateUser {
        /// The repeated user id.
        id: u64,
    },
    /// Two events shared the same id.
    #[error("duplicate event id {id}")]
    DuplicateEvent {
        /// The repeated event id.
        id: u64,
    },
    /// An event referenced a host that is not in the user table.
    #[error("event {event_id} references unknown host {host_id}")]
    UnknownHost {
        /// The offending event id.
        event_id: u64,
        /// The dangling host reference.
        host_id: u64,
    },
}

impl ProfileStore {
    /// Validate referential integrity and construct a store.
    ///
    /// # Errors
    /// Returns a [`StoreError`] for duplicate user or event ids and for
    /// events whose host id does not resolve to a loaded profile.
    pub fn new(users: Vec<UserProfile>, events: Vec<Event>) -> Result<Self, StoreError> {
        let mut by_id = HashMap::with_capacity(users.len());
        for (index, user) in users.iter().enumerate() {
            if by_id.insert(user.id, index).is_some() {
                return Err(StoreError::DuplicateUser { id: user.id });
            }
        }
        let mut event_ids = HashMap::with_capacity(events.len());
        for event in &events {
            if event_ids.insert(event.id, ()).is_some() {
                return Err(StoreError::DuplicateEvent { id: event.id });
            }
            if !by_id.contains_key(&event.host_id) {
                return Err(StoreError::UnknownHost {
                    event_id: event.id,
                    host_id: event.host_id,
                });
            }
        }
        Ok(Self {
            users,
            events,
            by_id,
        })
    }

    /// Look up a profile by id.
    #[must_use]
    pub fn user(&self, id: u64) -> Option<&UserProfile> {
        self.by_id.get(&id).and_then(|&index| self.users.get(index))
    }

    /// All loaded profiles, in load order.
    #[must_use]
    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    /// All loaded events, in load order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of loaded profiles.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Run the one-time clustering pass and annotate every profile with its
    /// display label.
    ///
    /// This is the only mutation the store permits after construction; call
    /// it before the store is shared.
    ///
    /// # Errors
    /// Propagates [`PartitionError`] from the partitioner and reports a
    /// label-count mismatch as [`PartitionError::LabelCount`].
    pub fn assign_clusters(
        &mut self,
        partitioner: &dyn Partitioner,
        clusters: usize,
    ) -> Result<(), PartitionError> {
        let labels = partitioner.partition(&self.users, clusters)?;
        if labels.len() != self.users.len() {
            return Err(PartitionError::LabelCount {
                expected: self.users.len(),
                actual: labels.len(),
            });
        }
        for (user, label) in self.users.iter_mut().zip(labels) {
            user.cluster = Some(label);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{event, profile};
    use rstest::rstest;

    struct RoundRobin;

    impl Partitioner for RoundRobin {
        fn partition(
            &self,
            profiles: &[UserProfile],
            clusters: usize,
        ) -> Result<Vec<u32>, PartitionError> {
            let clusters = u32::try_from(clusters).unwrap_or(u32::MAX);
            Ok(profiles
                .iter()
                .enumerate()
                .map(|(index, _)| u32::try_from(index).unwrap_or(u32::MAX) % clusters)
                .collect())
        }
    }

    struct ShortLabels;

    impl Partitioner for ShortLabels {
        fn partition(
            &self,
            _profiles: &[UserProfile],
            _clusters: usize,
        ) -> Result<Vec<u32>, PartitionError> {
            Ok(vec![0])
        }
    }

    #[rstest]
    fn rejects_duplicate_user_ids() {
        let users = vec![profile(1, 30, &["chess"]), profile(1, 31, &["yoga"])];
        let err = ProfileStore::new(users, Vec::new()).unwrap_err();
        assert_eq!(err, StoreError::DuplicateUser { id: 1 });
    }

    #[rstest]
    fn rejects_dangling_event_host() {
        let users = vec![profile(1, 30, &["chess"])];
        let events = vec![event(5, "chess", 9)];
        let err = ProfileStore::new(users, events).unwrap_err();
        assert_eq!(
            err,
            StoreError::UnknownHost {
                event_id: 5,
                host_id: 9,
            }
        );
    }

    #[rstest]
    fn rejects_duplicate_event_ids() {
        let users = vec![profile(1, 30, &["chess"])];
        let events = vec![event(5, "chess", 1), event(5, "yoga", 1)];
        let err = ProfileStore::new(users, events).unwrap_err();
        assert_eq!(err, StoreError::DuplicateEvent { id: 5 });
    }

    #[rstest]
    fn lookup_by_id_ignores_load_order() {
        let users = vec![profile(8, 30, &["chess"]), profile(2, 31, &["yoga"])];
        let store = ProfileStore::new(users, Vec::new()).expect("valid store");
        assert_eq!(store.user(2).map(|u| u.age), Some(31));
        assert_eq!(store.user_count(), 2);
    }

    #[rstest]
    fn assign_clusters_annotates_every_profile() {
        let users = vec![
            profile(0, 30, &["chess"]),
            profile(1, 31, &["yoga"]),
            profile(2, 32, &["music"]),
        ];
        let mut store = ProfileStore::new(users, Vec::new()).expect("valid store");
        store
            .assign_clusters(&RoundRobin, 2)
            .expect("partitioning succeeds");
        let labels: Vec<_> = store.users().iter().filter_map(|u| u.cluster).collect();
        assert_eq!(labels, vec![0, 1, 0]);
    }

    #[rstest]
    fn assign_clusters_rejects_label_mismatch() {
        let users = vec![profile(0, 30, &["chess"]), profile(1, 31, &["yoga"])];
        let mut store = ProfileStore::new(users, Vec::new()).expect("valid store");
        let err = store.assign_clusters(&ShortLabels, 2).unwrap_err();
        assert_eq!(
            err,
            PartitionError::LabelCount {
                expected: 2,
                actual: 1,
            }
        );
    }
}
