//! Score candidate profiles against a target profile.
//!
//! The [`Scorer`] trait computes pairwise compatibility. Hard filters are
//! expressed through [`Eligibility`] rather than a sentinel zero score, so a
//! genuinely weak match can never be confused with a rejected candidate.

use crate::UserProfile;

/// Outcome of scoring one candidate for a target user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility {
    /// The candidate passed every hard filter and carries a score in
    /// `(0.0, 1.0]`.
    Eligible(f32),
    /// The candidate failed a hard filter and must not appear in results.
    Excluded,
}

impl Eligibility {
    /// Return the score for eligible candidates.
    #[must_use]
    pub fn score(self) -> Option<f32> {
        match self {
            Self::Eligible(score) => Some(score),
            Self::Excluded => None,
        }
    }

    /// Whether the candidate was rejected by a hard filter.
    #[must_use]
    pub fn is_excluded(self) -> bool {
        matches!(self, Self::Excluded)
    }
}

/// Calculate a compatibility score between two user profiles.
///
/// Higher scores indicate a better match for the target user.
/// Implementations must be thread-safe (`Send + Sync`) so scoring can run
/// across threads, and must not compare a profile with itself — excluding the
/// target from the candidate set is the caller's responsibility.
///
/// Implementations must:
/// - Produce finite (`f32::is_finite`) scores.
/// - Return values in `0.0..=1.0` for eligible candidates.
/// - Report hard-filter rejections as [`Eligibility::Excluded`], never as a
///   zero score.
///
/// Use [`Scorer::sanitise`] to apply the numeric guards.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use mingle_core::{Eligibility, Scorer, UserProfile};
///
/// struct OnlineOnly;
///
/// impl Scorer for OnlineOnly {
///     fn score(&self, _target: &UserProfile, candidate: &UserProfile) -> Eligibility {
///         if candidate.is_online {
///             Eligibility::Eligible(1.0)
///         } else {
///             Eligibility::Excluded
///         }
///     }
/// }
///
/// # fn main() -> Result<(), mingle_core::UserProfileError> {
/// let target = UserProfile::new(1, "A", 30, Coord { x: 0.0, y: 0.0 }, ["chess"])?;
/// let candidate =
///     UserProfile::new(2, "B", 31, Coord { x: 0.0, y: 0.0 }, ["chess"])?.online(true);
/// assert_eq!(OnlineOnly.score(&target, &candidate), Eligibility::Eligible(1.0));
/// # Ok(())
/// # }
/// ```
pub trait Scorer: Send + Sync {
    /// Score `candidate` as a match for `target`.
    fn score(&self, target: &UserProfile, candidate: &UserProfile) -> Eligibility;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(score: f32) -> f32
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedScorer, profile};
    use rstest::rstest;

    #[rstest]
    #[case(f32::NAN, 0.0)]
    #[case(f32::INFINITY, 0.0)]
    #[case(-0.5, 0.0)]
    #[case(1.5, 1.0)]
    #[case(0.25, 0.25)]
    fn sanitise_guards_raw_scores(#[case] raw: f32, #[case] expected: f32) {
        assert_eq!(<FixedScorer as Scorer>::sanitise(raw), expected);
    }

    #[rstest]
    fn eligibility_accessors() {
        let target = profile(1, 30, &["chess"]);
        let candidate = profile(2, 30, &["chess"]);
        let outcome = FixedScorer::with_score(0.4).score(&target, &candidate);
        assert_eq!(outcome.score(), Some(0.4));
        assert!(!outcome.is_excluded());
        assert!(Eligibility::Excluded.is_excluded());
        assert_eq!(Eligibility::Excluded.score(), None);
    }
}
