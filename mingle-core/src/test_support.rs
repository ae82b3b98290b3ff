//! Test-only builders and scorer doubles shared by unit and behaviour tests.

use std::collections::HashMap;

use geo::Coord;

use crate::{Eligibility, Event, Scorer, UserProfile};

/// Build an online profile at the origin with the given hobbies.
///
/// # Panics
/// Panics when `hobbies` is empty; fixtures should fail fast.
#[must_use]
pub fn profile(id: u64, age: u32, hobbies: &[&str]) -> UserProfile {
    UserProfile::new(
        id,
        format!("user-{id}"),
        age,
        Coord { x: 0.0, y: 0.0 },
        hobbies.iter().copied(),
    )
    .expect("test profile must be valid")
    .online(true)
}

/// Build an event at the origin with the given hobby and host.
///
/// # Panics
/// Panics when `hobby` is blank; fixtures should fail fast.
#[must_use]
pub fn event(id: u64, hobby: &str, host_id: u64) -> Event {
    Event::new(
        id,
        format!("event-{id}"),
        host_id,
        hobby,
        Coord { x: 0.0, y: 0.0 },
    )
    .expect("test event must be valid")
}

/// Scorer double that reports every candidate eligible at a fixed score.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedScorer {
    score: f32,
}

impl FixedScorer {
    /// Score every candidate at `score`.
    #[must_use]
    pub fn with_score(score: f32) -> Self {
        Self { score }
    }
}

impl Scorer for FixedScorer {
    fn score(&self, _target: &UserProfile, _candidate: &UserProfile) -> Eligibility {
        Eligibility::Eligible(self.score)
    }
}

/// Scorer double backed by a candidate-id lookup table.
///
/// Candidates absent from the table are reported as excluded, which makes
/// ranking outcomes fully scriptable in tests.
#[derive(Debug, Default, Clone)]
pub struct ScoreTable {
    scores: HashMap<u64, f32>,
}

impl ScoreTable {
    /// Build a table from `(candidate id, score)` pairs.
    #[must_use]
    pub fn with_scores(scores: &[(u64, f32)]) -> Self {
        Self {
            scores: scores.iter().copied().collect(),
        }
    }
}

impl Scorer for ScoreTable {
    fn score(&self, _target: &UserProfile, candidate: &UserProfile) -> Eligibility {
        self.scores
            .get(&candidate.id)
            .copied()
            .map_or(Eligibility::Excluded, Eligibility::Eligible)
    }
}
