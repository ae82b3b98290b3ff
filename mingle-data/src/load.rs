//! CSV loading for the users and events tables.
//!
//! The tables come from the data-generation collaborator; their shapes are a
//! fixed contract. Two quirks of the original pandas pipeline are honoured
//! here: the `hobbies` column serializes a Python list (`"['a', 'b']"`), and
//! booleans arrive capitalised (`True`/`False`). Any malformed row aborts the
//! load — integrity failures are fatal at startup, never per-request.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use mingle_core::{Event, EventError, ProfileStore, StoreError, UserProfile, UserProfileError};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

use crate::fsio;

/// Errors raised while loading the datasets.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Opening a dataset file failed.
    #[error("failed to open dataset at {path}")]
    Open {
        /// Requested dataset path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// A CSV record could not be decoded.
    #[error("failed to decode dataset at {path}")]
    Decode {
        /// Offending dataset path.
        path: Utf8PathBuf,
        /// Source error from the CSV reader.
        #[source]
        source: csv::Error,
    },
    /// A user row decoded but failed profile validation.
    #[error("user {user_id} in {path} is invalid")]
    InvalidProfile {
        /// Offending dataset path.
        path: Utf8PathBuf,
        /// The rejected user id.
        user_id: u64,
        /// Validation failure from the core model.
        #[source]
        source: UserProfileError,
    },
    /// An event row decoded but failed validation.
    #[error("event {event_id} in {path} is invalid")]
    InvalidEvent {
        /// Offending dataset path.
        path: Utf8PathBuf,
        /// The rejected event id.
        event_id: u64,
        /// Validation failure from the core model.
        #[source]
        source: EventError,
    },
    /// The loaded tables failed cross-table integrity checks.
    #[error("loaded datasets failed integrity checks")]
    Integrity {
        /// Duplicate-id or dangling-reference detail.
        #[source]
        source: StoreError,
    },
}

/// One record of the users table, in contract column order.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UserRow {
    pub(crate) user_id: u64,
    pub(crate) name: String,
    pub(crate) age: u32,
    pub(crate) location_lat: f64,
    pub(crate) location_lon: f64,
    pub(crate) hobbies: String,
    #[serde(
        deserialize_with = "python_bool::deserialize",
        serialize_with = "python_bool::serialize"
    )]
    pub(crate) is_online: bool,
    #[serde(
        deserialize_with = "python_bool::deserialize",
        serialize_with = "python_bool::serialize"
    )]
    pub(crate) available_weekends: bool,
    #[serde(
        deserialize_with = "python_bool::deserialize",
        serialize_with = "python_bool::serialize"
    )]
    pub(crate) available_weekdays: bool,
}

/// One record of the events table, in contract column order.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EventRow {
    pub(crate) event_id: u64,
    pub(crate) title: String,
    pub(crate) host_id: u64,
    pub(crate) hobby: String,
    pub(crate) location_lat: f64,
    pub(crate) location_lon: f64,
}

impl From<&UserProfile> for UserRow {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.id,
            name: profile.name.clone(),
            age: profile.age,
            location_lat: profile.location.y,
            location_lon: profile.location.x,
            hobbies: format_hobby_list(profile),
            is_online: profile.is_online,
            available_weekends: profile.available_weekends,
            available_weekdays: profile.available_weekdays,
        }
    }
}

impl From<&Event> for EventRow {
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

/// Read and validate the users table.
///
/// # Errors
/// Returns [`LoadError`] for I/O failures, undecodable records, and rows
/// that fail profile validation.
pub fn read_users(path: &Utf8Path) -> Result<Vec<UserProfile>, LoadError> {
    let file = fsio::open_dataset(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let mut users = Vec::new();
    for record in reader.deserialize::<UserRow>() {
        let row = record.map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = UserProfile::new(
            row.user_id,
            row.name,
            row.age,
            Coord {
                x: row.location_lon,
                y: row.location_lat,
            },
            parse_hobby_list(&row.hobbies),
        )
        .map_err(|source| LoadError::InvalidProfile {
            path: path.to_path_buf(),
            user_id: row.user_id,
            source,
        })?
        .online(row.is_online)
        .with_availability(row.available_weekends, row.available_weekdays);
        users.push(profile);
    }
    log::info!("loaded {} user profiles from {path}", users.len());
    Ok(users)
}

/// Read and validate the events table.
///
/// # Errors
/// Returns [`LoadError`] for I/O failures, undecodable records, and rows
/// that fail event validation.
pub fn read_events(path: &Utf8Path) -> Result<Vec<Event>, LoadError> {
    let file = fsio::open_dataset(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let mut events = Vec::new();
    for record in reader.deserialize::<EventRow>() {
        let row = record.map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let event = Event::new(
            row.event_id,
            row.title,
            row.host_id,
            row.hobby,
            Coord {
                x: row.location_lon,
                y: row.location_lat,
            },
        )
        .map_err(|source| LoadError::InvalidEvent {
            path: path.to_path_buf(),
            event_id: row.event_id,
            source,
        })?;
        events.push(event);
    }
    log::info!("loaded {} events from {path}", events.len());
    Ok(events)
}

/// Load both tables and assemble the validated [`ProfileStore`].
///
/// # Errors
/// Propagates [`LoadError`] from either table and reports duplicate ids or
/// dangling host references as [`LoadError::Integrity`].
pub fn load_store(users_path: &Utf8Path, events_path: &Utf8Path) -> Result<ProfileStore, LoadError> {
    let users = read_users(users_path)?;
    let events = read_events(events_path)?;
    ProfileStore::new(users, events).map_err(|source| LoadError::Integrity { source })
}

/// Decode the pandas-style serialized hobby list.
///
/// Accepts `"['hiking', 'chess']"` as well as plain comma-separated tags;
/// blank entries are dropped so validation can flag truly empty lists.
fn parse_hobby_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|tag| tag.trim().trim_matches('\'').trim_matches('"').trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Encode a profile's hobbies in the pandas list format.
fn format_hobby_list(profile: &UserProfile) -> String {
    let quoted: Vec<String> = profile
        .hobbies
        .iter()
        .map(|hobby| format!("'{hobby}'"))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Booleans in the contract CSVs are Python-capitalised.
mod python_bool {
    use super::{Deserialize, Deserializer, Serializer, de};

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean '{other}'"))),
        }
    }

    pub(crate) fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("['hiking', 'chess']", &["hiking", "chess"])]
    #[case("[\"yoga\"]", &["yoga"])]
    #[case("reading, cooking", &["reading", "cooking"])]
    #[case("[]", &[])]
    fn hobby_lists_decode(#[case] raw: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_hobby_list(raw), expected);
    }

    #[rstest]
    fn hobby_lists_round_trip() {
        let profile = mingle_core::test_support::profile(1, 30, &["chess", "hiking"]);
        let encoded = format_hobby_list(&profile);
        assert_eq!(encoded, "['chess', 'hiking']");
        assert_eq!(parse_hobby_list(&encoded), vec!["chess", "hiking"]);
    }
}
