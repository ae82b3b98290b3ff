//! JSON wire shapes for the HTTP boundary.
//!
//! Views own the encoding so the core crate stays serialization-free. Field
//! names mirror the tabular data contract (`user_id`, `location_lat`, ...),
//! which is what the demo dashboard already consumes.

use mingle_core::{Event, MatchResult, UserProfile};
use serde::Serialize;

/// A user record as exposed over the wire.
#[derive(Debug, Serialize)]
pub struct UserView {
    /// Unique user id.
    pub user_id: u64,
    /// Display name.
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    /// Latitude in degrees.
    pub location_lat: f64,
    /// Longitude in degrees.
    pub location_lon: f64,
    /// Hobby tags, sorted.
    pub hobbies: Vec<String>,
    /// Whether the user counts as active now.
    pub is_online: bool,
    /// Weekend availability flag.
    pub available_weekends: bool,
    /// Weekday availability flag.
    pub available_weekdays: bool,
    /// Display cluster label, when the clustering pass has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<u32>,
}

impl From<&UserProfile> for UserView {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id,
            name: profile.name.clone(),
            age: profile.age,
            location_lat: profile.location.y,
            location_lon: profile.location.x,
            hobbies: profile.hobbies.iter().cloned().collect(),
            is_online: profile.is_online,
            available_weekends: profile.available_weekends,
            available_weekdays: profile.available_weekdays,
            cluster: profile.cluster,
        }
    }
}

/// An event record as exposed over the wire.
#[derive(Debug, Serialize)]
pub struct EventView {
    /// Unique event id.
    pub event_id: u64,
    /// Display title.
    pub title: String,
    /// Hosting user's id.
    pub host_id: u64,
    /// The event's hobby tag.
    pub hobby: String,
    /// Latitude in degrees.
    pub location_lat: f64,
    /// Longitude in degrees.
    pub location_lon: f64,
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.id,
            title: event.title.clone(),
            host_id: event.host_id,
            hobby: event.hobby.clone(),
            location_lat: event.location.y,
            location_lon: event.location.x,
        }
    }
}

/// A ranked user annotated with its match score.
#[derive(Debug, Serialize)]
pub struct UserMatchView {
    /// The matched user record.
    #[serde(flatten)]
    pub user: UserView,
    /// The computed compatibility score.
    pub match_score: f32,
}

impl From<&MatchResult<UserProfile>> for UserMatchView {
    fn from(result: &MatchResult<UserProfile>) -> Self {
        Self {
            user: UserView::from(&result.item),
            match_score: result.score,
        }
    }
}

/// A ranked event annotated with its match score.
#[derive(Debug, Serialize)]
pub struct EventMatchView {
    /// The matched event record.
    #[serde(flatten)]
    pub event: EventView,
    /// The computed compatibility score.
    pub match_score: f32,
}

impl From<&MatchResult<Event>> for EventMatchView {
    fn from(result: &MatchResult<Event>) -> Self {
        Self {
            event: EventView::from(&result.item),
            match_score: result.score,
        }
    }
}

/// Response body for `GET /match/users/:user_id`.
#[derive(Debug, Serialize)]
pub struct UserMatchesResponse {
    /// The requested target id.
    pub user_id: u64,
    /// Ranked matches, best first.
    pub matches: Vec<UserMatchView>,
}

/// Response body for `GET /match/events/:user_id`.
#[derive(Debug, Serialize)]
pub struct EventMatchesResponse {
    /// The requested target id.
    pub user_id: u64,
    /// Ranked events, best first.
    pub events: Vec<EventMatchView>,
}
