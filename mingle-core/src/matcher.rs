//! Rank candidate users and events for a target profile.
//!
//! [`Matcher`] borrows the read-only [`ProfileStore`] and a [`Scorer`] and
//! performs the filter-then-rank pipeline per request. Results are ephemeral
//! annotations; nothing is persisted.

use thiserror::Error;

use crate::{Eligibility, Event, ProfileStore, Scorer, UserProfile};

/// Default number of user matches returned by the boundary layers.
pub const DEFAULT_USER_TOP_N: usize = 10;
/// Default number of event matches returned by the boundary layers.
pub const DEFAULT_EVENT_TOP_N: usize = 5;

/// Score for an event whose hobby is in the target's hobby set.
pub const EVENT_HOBBY_SCORE: f32 = 1.0;
/// Floor score for every other event; events are never excluded outright.
pub const EVENT_OFF_HOBBY_SCORE: f32 = 0.1;

/// A store entry annotated with its computed match score.
///
/// Created per request; `score` is in `(0.0, 1.0]` for users and exactly
/// [`EVENT_HOBBY_SCORE`] or [`EVENT_OFF_HOBBY_SCORE`] for events.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<T> {
    /// The matched profile or event.
    pub item: T,
    /// The computed compatibility score.
    pub score: f32,
}

impl<T> MatchResult<T> {
    /// Pair an item with its score.
    pub fn new(item: T, score: f32) -> Self {
        Self { item, score }
    }
}

/// Errors returned by the ranking operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// The requested target id is not in the store.
    #[error("no user profile with id {id}")]
    UnknownUser {
        /// The id that failed to resolve.
        id: u64,
    },
}

/// Ranks candidates for a target user over a borrowed store and scorer.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use mingle_core::{Eligibility, Matcher, ProfileStore, Scorer, UserProfile};
///
/// struct Unit;
///
/// impl Scorer for Unit {
///     fn score(&self, _target: &UserProfile, _candidate: &UserProfile) -> Eligibility {
///         Eligibility::Eligible(1.0)
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let users = vec![
///     UserProfile::new(0, "Ada", 30, Coord { x: 0.0, y: 0.0 }, ["chess"])?,
///     UserProfile::new(1, "Sam", 31, Coord { x: 0.0, y: 0.0 }, ["yoga"])?,
/// ];
/// let store = ProfileStore::new(users, Vec::new())?;
/// let matcher = Matcher::new(&store, &Unit);
/// let matches = matcher.user_matches(0, 10)?;
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches.first().map(|m| m.item.id), Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct Matcher<'a> {
    store: &'a ProfileStore,
    scorer: &'a dyn Scorer,
}

impl<'a> Matcher<'a> {
    /// Borrow a store and scorer for the lifetime of the requests.
    #[must_use]
    pub fn new(store: &'a ProfileStore, scorer: &'a dyn Scorer) -> Self {
        Self { store, scorer }
    }

    /// Rank every other profile for `target_id` and keep the best `top_n`.
    ///
    /// Candidates the scorer reports as [`Eligibility::Excluded`] are
    /// dropped. The result is sorted by score descending with ties broken by
    /// ascending id so equal scores rank deterministically. `top_n == 0`
    /// yields an empty vector without error.
    ///
    /// # Errors
    /// Returns [`MatchError::UnknownUser`] when `target_id` is not in the
    /// store.
    pub fn user_matches(
        &self,
        target_id: u64,
        top_n: usize,
    ) -> Result<Vec<MatchResult<UserProfile>>, MatchError> {
        let target = self
            .store
            .user(target_id)
            .ok_or(MatchError::UnknownUser { id: target_id })?;

        let mut ranked: Vec<(&UserProfile, f32)> = self
            .store
            .users()
            .iter()
            .filter(|candidate| candidate.id != target_id)
            .filter_map(|candidate| match self.scorer.score(target, candidate) {
                Eligibility::Eligible(score) => Some((candidate, score)),
                Eligibility::Excluded => None,
            })
            .collect();

        sort_and_truncate(&mut ranked, top_n, |user| user.id);
        Ok(ranked
            .into_iter()
            .map(|(user, score)| MatchResult::new(user.clone(), score))
            .collect())
    }

    /// Rank every event for `target_id` and keep the best `top_n`.
    ///
    /// An event scores [`EVENT_HOBBY_SCORE`] when its hobby appears in the
    /// target's hobby set and [`EVENT_OFF_HOBBY_SCORE`] otherwise — events
    /// are floored, never filtered, so the result is non-empty whenever
    /// events exist and `top_n > 0`. Ordering matches
    /// [`Self::user_matches`].
    ///
    /// # Errors
    /// Returns [`MatchError::UnknownUser`] when `target_id` is not in the
    /// store.
    pub fn event_matches(
        &self,
        target_id: u64,
        top_n: usize,
    ) -> Result<Vec<MatchResult<Event>>, MatchError> {
        let target = self
            .store
            .user(target_id)
            .ok_or(MatchError::UnknownUser { id: target_id })?;

        let mut ranked: Vec<(&Event, f32)> = self
            .store
            .events()
            .iter()
            .map(|event| {
                let score = if target.hobbies.contains(&event.hobby) {
                    EVENT_HOBBY_SCORE
                } else {
                    EVENT_OFF_HOBBY_SCORE
                };
                (event, score)
            })
            .collect();

        sort_and_truncate(&mut ranked, top_n, |event| event.id);
        Ok(ranked
            .into_iter()
            .map(|(event, score)| MatchResult::new(event.clone(), score))
            .collect())
    }
}

/// Order by score descending, break ties by ascending id, keep `top_n`.
fn sort_and_truncate<T>(ranked: &mut Vec<(&T, f32)>, top_n: usize, id: impl Fn(&T) -> u64) {
    ranked.sort_by(|left, right| {
        right
            .1
            .total_cmp(&left.1)
            .then_with(|| id(left.0).cmp(&id(right.0)))
    });
    ranked.truncate(top_n);
}
