use std::collections::BTreeSet;

use geo::Coord;
use thiserror::Error;

/// A member of the matching population.
///
/// Coordinates are raw WGS84 degrees with `x = longitude` and `y = latitude`;
/// the scorer treats them as a flat plane. Hobbies are an unordered,
/// deduplicated tag set and must be non-empty so that Jaccard similarity is
/// always defined. The weekend/weekday availability flags travel with the
/// external data contract but do not influence scoring.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use mingle_core::UserProfile;
///
/// # fn main() -> Result<(), mingle_core::UserProfileError> {
/// let profile = UserProfile::new(
///     7,
///     "Ada",
///     34,
///     Coord { x: -74.0, y: 40.7 },
///     ["chess", "hiking"],
/// )?
/// .online(true);
/// assert!(profile.hobbies.contains("chess"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Unique identifier; the store indexes profiles by it.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    /// Geographic position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Hobby tags; never empty.
    pub hobbies: BTreeSet<String>,
    /// Whether the user counts as "active now" for the availability filter.
    pub is_online: bool,
    /// Weekend availability (data-contract field, unused by scoring).
    pub available_weekends: bool,
    /// Weekday availability (data-contract field, unused by scoring).
    pub available_weekdays: bool,
    /// Display cluster label, assigned once after load.
    pub cluster: Option<u32>,
}

/// Errors returned by [`UserProfile::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserProfileError {
    /// The hobby set was empty after deduplication.
    #[error("user profile must have at least one hobby")]
    EmptyHobbies,
    /// A coordinate was NaN or infinite.
    #[error("user profile location must be finite")]
    NonFiniteLocation,
}

impl UserProfile {
    /// Validates and constructs a [`UserProfile`].
    ///
    /// The profile starts offline with no availability flags set; chain
    /// [`Self::online`] and [`Self::with_availability`] to adjust them.
    ///
    /// # Errors
    /// Returns [`UserProfileError::EmptyHobbies`] when no hobby survives
    /// deduplication and [`UserProfileError::NonFiniteLocation`] for NaN or
    /// infinite coordinates.
    pub fn new<I, S>(
        id: u64,
        name: impl Into<String>,
        age: u32,
        location: Coord<f64>,
        hobbies: I,
    ) -> Result<Self, UserProfileError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hobbies: BTreeSet<String> = hobbies.into_iter().map(Into::into).collect();
        if hobbies.is_empty() {
            return Err(UserProfileError::EmptyHobbies);
        }
        if !location.x.is_finite() || !location.y.is_finite() {
            return Err(UserProfileError::NonFiniteLocation);
        }
        Ok(Self {
            id,
            name: name.into(),
            age,
            location,
            hobbies,
            is_online: false,
            available_weekends: false,
            available_weekdays: false,
            cluster: None,
        })
    }

    /// Set the online flag while returning `self` for chaining.
    #[must_use]
    pub fn online(mut self, is_online: bool) -> Self {
        self.is_online = is_online;
        self
    }

    /// Set the availability flags while returning `self` for chaining.
    #[must_use]
    pub fn with_availability(mut self, weekends: bool, weekdays: bool) -> Self {
        self.available_weekends = weekends;
        self.available_weekdays = weekdays;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_hobbies_collapse() {
        let profile = UserProfile::new(
            1,
            "Sam",
            28,
            Coord { x: 0.0, y: 0.0 },
            ["chess", "chess", "yoga"],
        )
        .expect("valid profile");
        assert_eq!(profile.hobbies.len(), 2);
    }

    #[rstest]
    fn empty_hobby_set_is_rejected() {
        let result = UserProfile::new(1, "Sam", 28, Coord { x: 0.0, y: 0.0 }, Vec::<String>::new());
        assert_eq!(result.unwrap_err(), UserProfileError::EmptyHobbies);
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn non_finite_location_is_rejected(#[case] x: f64, #[case] y: f64) {
        let result = UserProfile::new(1, "Sam", 28, Coord { x, y }, ["chess"]);
        assert_eq!(result.unwrap_err(), UserProfileError::NonFiniteLocation);
    }

    #[rstest]
    fn chaining_sets_flags() {
        let profile = UserProfile::new(2, "Kim", 40, Coord { x: 1.0, y: 2.0 }, ["dancing"])
            .expect("valid profile")
            .online(true)
            .with_availability(true, false);
        assert!(profile.is_online);
        assert!(profile.available_weekends);
        assert!(!profile.available_weekdays);
    }
}
