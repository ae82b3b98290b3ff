//! The weighted hybrid compatibility scorer.
//!
//! Two hard filters gate every candidate: the age window and the online
//! flag. Candidates that pass are scored as a weighted sum of hobby overlap
//! (Jaccard), location proximity (exponential decay over raw coordinate
//! distance), age similarity (Gaussian), and the behaviour signal.

use std::collections::BTreeSet;

use geo::Coord;
use mingle_core::{Eligibility, Scorer, UserProfile};

use crate::{BehaviourSignal, ScoreWeights, UniformBehaviour, WeightsError};

/// Candidates outside `target.age ± AGE_TOLERANCE_YEARS` are excluded.
const AGE_TOLERANCE_YEARS: u32 = 5;
/// Decay rate for the location term; distance 0 scores 1.0.
const DISTANCE_DECAY_RATE: f64 = 5.0;
/// Width of the Gaussian age-similarity curve.
const AGE_CURVE_WIDTH: f64 = 100.0;

/// Scorer combining hard filters with four weighted sub-scores.
///
/// The behaviour term is the only stochastic component; inject a
/// [`FixedBehaviour`](crate::FixedBehaviour) to make scoring fully
/// deterministic in tests.
#[derive(Debug)]
pub struct HybridScorer<B = UniformBehaviour> {
    weights: ScoreWeights,
    behaviour: B,
}

impl HybridScorer<UniformBehaviour> {
    /// Build a scorer with the reference weights and a seeded uniform
    /// behaviour stream.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            weights: ScoreWeights::default(),
            behaviour: UniformBehaviour::seeded(seed),
        }
    }
}

impl<B: BehaviourSignal> HybridScorer<B> {
    /// Build a scorer from validated weights and a behaviour signal.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when the weights are non-finite, negative,
    /// or do not total a value in `(0.0, 1.0]`.
    pub fn new(weights: ScoreWeights, behaviour: B) -> Result<Self, WeightsError> {
        let weights = weights.validate()?;
        Ok(Self { weights, behaviour })
    }

    fn passes_hard_filters(target: &UserProfile, candidate: &UserProfile) -> bool {
        target.age.abs_diff(candidate.age) <= AGE_TOLERANCE_YEARS && candidate.is_online
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "hybrid scoring sums weighted sub-scores"
    )]
    fn weighted_total(&self, target: &UserProfile, candidate: &UserProfile) -> f32 {
        let hobby = hobby_similarity(&target.hobbies, &candidate.hobbies);
        let location = location_affinity(target.location, candidate.location);
        let age = age_affinity(target.age, candidate.age);
        let behaviour = <Self as Scorer>::sanitise(self.behaviour.sample());

        self.weights.hobby * hobby
            + self.weights.location * location
            + self.weights.age * age
            + self.weights.behaviour * behaviour
    }
}

impl<B: BehaviourSignal> Scorer for HybridScorer<B> {
    fn score(&self, target: &UserProfile, candidate: &UserProfile) -> Eligibility {
        if !Self::passes_hard_filters(target, candidate) {
            return Eligibility::Excluded;
        }
        Eligibility::Eligible(<Self as Scorer>::sanitise(
            self.weighted_total(target, candidate),
        ))
    }
}

/// Jaccard index of the two hobby sets.
///
/// An empty union cannot occur for validated profiles but is guarded as 0.0
/// rather than propagating a division fault.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "set cardinalities are tiny; the ratio needs floating-point division"
)]
fn hobby_similarity(target: &BTreeSet<String>, candidate: &BTreeSet<String>) -> f32 {
    let intersection = target.intersection(candidate).count();
    let union = target.len() + candidate.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

/// Exponential decay over the Euclidean distance between raw coordinate
/// pairs. The demo treats longitude/latitude as a flat plane; geodesic
/// distance is deliberately not used.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "distance decay is computed in f64 and narrowed to the f32 score range"
)]
fn location_affinity(target: Coord<f64>, candidate: Coord<f64>) -> f32 {
    let distance = (target.x - candidate.x).hypot(target.y - candidate.y);
    (-distance * DISTANCE_DECAY_RATE).exp() as f32
}

/// Gaussian age similarity; identical ages score 1.0.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "the Gaussian is computed in f64 and narrowed to the f32 score range"
)]
fn age_affinity(target: u32, candidate: u32) -> f32 {
    let diff = f64::from(target.abs_diff(candidate));
    (-(diff * diff) / AGE_CURVE_WIDTH).exp() as f32
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating point values"
)]
mod tests {
    use super::*;
    use crate::FixedBehaviour;
    use mingle_core::test_support::profile;
    use rstest::{fixture, rstest};

    fn deterministic_scorer(behaviour: f32) -> HybridScorer<FixedBehaviour> {
        HybridScorer::new(ScoreWeights::default(), FixedBehaviour::new(behaviour))
            .expect("default weights are valid")
    }

    #[fixture]
    fn target() -> UserProfile {
        profile(0, 30, &["hiking", "coding", "music"])
    }

    #[rstest]
    #[case(24)]
    #[case(36)]
    #[case(40)]
    fn age_outside_window_is_excluded(target: UserProfile, #[case] age: u32) {
        let candidate = profile(1, age, &["hiking"]);
        let scorer = deterministic_scorer(0.9);
        assert!(scorer.score(&target, &candidate).is_excluded());
    }

    #[rstest]
    #[case(25)]
    #[case(30)]
    #[case(35)]
    fn age_window_boundaries_stay_eligible(target: UserProfile, #[case] age: u32) {
        let candidate = profile(1, age, &["hiking"]);
        let scorer = deterministic_scorer(0.9);
        assert!(!scorer.score(&target, &candidate).is_excluded());
    }

    #[rstest]
    fn offline_candidates_are_excluded(target: UserProfile) {
        let candidate = profile(1, 30, &["hiking"]).online(false);
        let scorer = deterministic_scorer(0.9);
        assert!(scorer.score(&target, &candidate).is_excluded());
    }

    #[rstest]
    fn disjoint_hobbies_still_score_through_other_terms(target: UserProfile) {
        let candidate = profile(1, 30, &["painting"]);
        let scorer = deterministic_scorer(0.9);
        let score = scorer
            .score(&target, &candidate)
            .score()
            .expect("filters pass");
        assert!(score > 0.0);
        assert!(score <= 1.0);
    }

    #[rstest]
    #[case(0.8, 0.6628)]
    #[case(1.0, 0.6828)]
    fn reference_scenario_matches_the_hand_computation(
        target: UserProfile,
        #[case] behaviour: f32,
        #[case] expected: f32,
    ) {
        // Jaccard 1/4, distance 0, age gap 3: 0.1 + 0.3 + 0.2 * exp(-0.09)
        // plus the weighted behaviour term.
        let candidate = profile(1, 33, &["hiking", "chess"]);
        let scorer = deterministic_scorer(behaviour);
        let score = scorer
            .score(&target, &candidate)
            .score()
            .expect("filters pass");
        let gaussian = (-0.09_f32).exp() * 0.2;
        let total = 0.1 + 0.3 + gaussian + 0.1 * behaviour;
        assert!((score - total).abs() < 1e-4);
        assert!((score - expected).abs() < 1e-3);
    }

    #[rstest]
    fn hobby_similarity_is_symmetric() {
        let left: BTreeSet<String> = ["hiking", "chess"].map(String::from).into();
        let right: BTreeSet<String> = ["hiking", "coding", "music"].map(String::from).into();
        assert_eq!(
            hobby_similarity(&left, &right).to_bits(),
            hobby_similarity(&right, &left).to_bits()
        );
    }

    #[rstest]
    fn zero_union_guard_returns_zero() {
        let empty = BTreeSet::new();
        assert_eq!(hobby_similarity(&empty, &empty), 0.0);
    }

    #[rstest]
    fn identical_location_and_age_score_full_sub_terms() {
        assert!((location_affinity(Coord { x: 1.0, y: 2.0 }, Coord { x: 1.0, y: 2.0 }) - 1.0).abs() < f32::EPSILON);
        assert!((age_affinity(40, 40) - 1.0).abs() < f32::EPSILON);
    }

    #[rstest]
    fn distance_decay_falls_off_monotonically() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let near = location_affinity(origin, Coord { x: 0.1, y: 0.0 });
        let far = location_affinity(origin, Coord { x: 1.0, y: 0.0 });
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[rstest]
    fn seeded_scorers_replay_identical_totals(target: UserProfile) {
        let candidate = profile(1, 31, &["hiking"]);
        let left = HybridScorer::seeded(42);
        let right = HybridScorer::seeded(42);
        assert_eq!(
            left.score(&target, &candidate),
            right.score(&target, &candidate)
        );
    }
}
