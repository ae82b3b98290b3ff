//! Weight configuration for the hybrid scorer.

use thiserror::Error;

const MAX_TOTAL_WEIGHT: f32 = 1.0;

/// Relative weighting of the four hybrid sub-scores.
///
/// Each sub-score is normalised to `0.0..=1.0` before weighting, so a weight
/// set totalling at most 1.0 bounds the final score by 1.0.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreWeights {
    /// Multiplier for the Jaccard hobby-overlap term.
    pub hobby: f32,
    /// Multiplier for the exponential distance-decay term.
    pub location: f32,
    /// Multiplier for the Gaussian age-similarity term.
    pub age: f32,
    /// Multiplier for the behaviour-signal term.
    pub behaviour: f32,
}

/// Errors raised when validating [`ScoreWeights`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightsError {
    /// A weight was NaN, infinite, or negative.
    #[error("weights must be finite and non-negative")]
    InvalidWeight,
    /// The weights totalled zero or exceeded 1.0.
    #[error("weights must total a positive value no greater than 1.0")]
    InvalidTotal,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightsError::InvalidWeight`] for non-finite or negative
    /// values and [`WeightsError::InvalidTotal`] when the sum leaves
    /// `(0.0, 1.0]`.
    pub fn validate(self) -> Result<Self, WeightsError> {
        if !self.has_finite_values() || !self.has_non_negative_values() {
            return Err(WeightsError::InvalidWeight);
        }
        let total = self.total();
        if total <= 0.0_f32 || total > MAX_TOTAL_WEIGHT {
            return Err(WeightsError::InvalidTotal);
        }
        Ok(self)
    }

    /// Sum of the four weights.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the weight total is a simple sum used for validation and bounds"
    )]
    pub fn total(self) -> f32 {
        self.hobby + self.location + self.age + self.behaviour
    }

    const fn has_finite_values(self) -> bool {
        self.hobby.is_finite()
            && self.location.is_finite()
            && self.age.is_finite()
            && self.behaviour.is_finite()
    }

    const fn has_non_negative_values(self) -> bool {
        self.hobby >= 0.0_f32
            && self.location >= 0.0_f32
            && self.age >= 0.0_f32
            && self.behaviour >= 0.0_f32
    }
}

impl Default for ScoreWeights {
    /// The reference weighting: hobbies 0.4, location 0.3, age 0.2,
    /// behaviour 0.1.
    fn default() -> Self {
        Self {
            hobby: 0.4_f32,
            location: 0.3_f32,
            age: 0.2_f32,
            behaviour: 0.1_f32,
        }
    }
}
