use geo::Coord;
use thiserror::Error;

/// A hosted activity that can be suggested to users.
///
/// Events carry a single hobby tag and a reference to the hosting user's id.
/// They have no lifecycle beyond the static load at startup.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use mingle_core::Event;
///
/// # fn main() -> Result<(), mingle_core::EventError> {
/// let event = Event::new(3, "Sunday ride", 12, "cycling", Coord { x: -74.0, y: 40.7 })?;
/// assert_eq!(event.host_id, 12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Unique identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Id of the hosting user.
    pub host_id: u64,
    /// The event's main hobby tag.
    pub hobby: String,
    /// Geographic position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
}

/// Errors returned by [`Event::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// The hobby tag was empty or whitespace.
    #[error("event must carry a non-empty hobby tag")]
    EmptyHobby,
}

impl Event {
    /// Validates and constructs an [`Event`].
    ///
    /// # Errors
    /// Returns [`EventError::EmptyHobby`] when the hobby tag is blank.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        host_id: u64,
        hobby: impl Into<String>,
        location: Coord<f64>,
    ) -> Result<Self, EventError> {
        let hobby = hobby.into();
        if hobby.trim().is_empty() {
            return Err(EventError::EmptyHobby);
        }
        Ok(Self {
            id,
            title: title.into(),
            host_id,
            hobby,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_hobby_is_rejected(#[case] hobby: &str) {
        let result = Event::new(1, "Meetup", 0, hobby, Coord { x: 0.0, y: 0.0 });
        assert_eq!(result.unwrap_err(), EventError::EmptyHobby);
    }

    #[rstest]
    fn constructs_with_tag() {
        let event =
            Event::new(1, "Board games", 4, "chess", Coord { x: 0.5, y: 0.5 }).expect("valid");
        assert_eq!(event.hobby, "chess");
    }
}
