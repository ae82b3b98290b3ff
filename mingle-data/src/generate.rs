//! Seeded synthetic dataset generation.
//!
//! Mirrors the original demo generator: a population scattered around a base
//! point with 3–6 hobbies each, a 70% online ratio, and events hosted by
//! random members near their host's location. Everything flows from a single
//! seed so regenerated datasets are reproducible.

use std::io;

use camino::Utf8Path;
use geo::Coord;
use mingle_core::{Event, EventError, UserProfile, UserProfileError};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::fsio;
use crate::load::{EventRow, UserRow};

/// The hobby vocabulary shared by users and events.
pub const ALL_HOBBIES: [&str; 18] = [
    "hiking",
    "coding",
    "gaming",
    "reading",
    "cooking",
    "photography",
    "yoga",
    "painting",
    "music",
    "dancing",
    "traveling",
    "cycling",
    "swimming",
    "running",
    "chess",
    "movies",
    "blogging",
    "gardening",
];

// Population scatter: roughly a 50 km box around lower Manhattan.
const BASE_LAT: f64 = 40.7128;
const BASE_LON: f64 = -74.0060;
const LOCATION_JITTER: f64 = 0.5;
const EVENT_JITTER: f64 = 0.1;

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 70;
const MIN_HOBBIES: usize = 3;
const MAX_HOBBIES: usize = 6;
const ONLINE_RATIO: f64 = 0.7;

const FIRST_NAMES: [&str; 16] = [
    "Ada", "Bruno", "Carmen", "Dmitri", "Elena", "Farid", "Grace", "Hugo", "Iris", "Jonas",
    "Keiko", "Lars", "Mina", "Noel", "Priya", "Tomas",
];
const LAST_NAMES: [&str; 16] = [
    "Alves", "Becker", "Castillo", "Dorsey", "Eriksen", "Fontaine", "Grant", "Haddad", "Ishida",
    "Jensen", "Kowalski", "Laurent", "Moreno", "Novak", "Okafor", "Petrov",
];
const EVENT_SETTINGS: [&str; 6] = [
    "Weekend", "Evening", "Sunrise", "Downtown", "Rooftop", "Riverside",
];

/// Errors raised while generating or writing datasets.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A generated profile failed core validation.
    #[error("generated user {user_id} is invalid")]
    Profile {
        /// The rejected user id.
        user_id: u64,
        /// Validation failure from the core model.
        #[source]
        source: UserProfileError,
    },
    /// A generated event failed core validation.
    #[error("generated event {event_id} is invalid")]
    Event {
        /// The rejected event id.
        event_id: u64,
        /// Validation failure from the core model.
        #[source]
        source: EventError,
    },
    /// Events were requested for an empty population.
    #[error("cannot generate events without users to host them")]
    NoHosts,
    /// Writing a dataset file failed.
    #[error("failed to write dataset at {path}")]
    Write {
        /// Target dataset path.
        path: camino::Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// Serializing a record failed.
    #[error("failed to serialize dataset at {path}")]
    Serialize {
        /// Target dataset path.
        path: camino::Utf8PathBuf,
        /// Source error from the CSV writer.
        #[source]
        source: csv::Error,
    },
}

/// Seeded source of synthetic users and events.
#[derive(Debug)]
pub struct Generator {
    rng: ChaCha8Rng,
}

impl Generator {
    /// Build a generator whose output is reproducible from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate `count` profiles with contiguous ids starting at 0.
    ///
    /// # Errors
    /// Returns [`GenerateError::Profile`] if a generated row fails core
    /// validation; with the fixed pools this indicates a generator bug.
    pub fn users(&mut self, count: u64) -> Result<Vec<UserProfile>, GenerateError> {
        (0..count).map(|id| self.user(id)).collect()
    }

    fn user(&mut self, id: u64) -> Result<UserProfile, GenerateError> {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Ada");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Alves");
        let age = self.rng.gen_range(MIN_AGE..=MAX_AGE);
        let location = Coord {
            x: BASE_LON + self.rng.gen_range(-LOCATION_JITTER..=LOCATION_JITTER),
            y: BASE_LAT + self.rng.gen_range(-LOCATION_JITTER..=LOCATION_JITTER),
        };
        let hobby_count = self.rng.gen_range(MIN_HOBBIES..=MAX_HOBBIES);
        let hobbies: Vec<&str> = ALL_HOBBIES
            .choose_multiple(&mut self.rng, hobby_count)
            .copied()
            .collect();
        let is_online = self.rng.gen_bool(ONLINE_RATIO);
        let weekends = self.rng.gen_bool(0.5);
        let weekdays = self.rng.gen_bool(0.5);

        UserProfile::new(id, format!("{first} {last}"), age, location, hobbies)
            .map_err(|source| GenerateError::Profile {
                user_id: id,
                source,
            })
            .map(|profile| profile.online(is_online).with_availability(weekends, weekdays))
    }

    /// Generate `count` events hosted by random members of `users`.
    ///
    /// # Errors
    /// Returns [`GenerateError::NoHosts`] for an empty population and
    /// [`GenerateError::Event`] if a generated row fails core validation.
    pub fn events(
        &mut self,
        users: &[UserProfile],
        count: u64,
    ) -> Result<Vec<Event>, GenerateError> {
        if users.is_empty() {
            return Err(GenerateError::NoHosts);
        }
        (0..count).map(|id| self.event(id, users)).collect()
    }

    fn event(&mut self, id: u64, users: &[UserProfile]) -> Result<Event, GenerateError> {
        let host = users
            .choose(&mut self.rng)
            .cloned()
            .ok_or(GenerateError::NoHosts)?;
        let hobby = ALL_HOBBIES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("hiking");
        let setting = EVENT_SETTINGS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("Weekend");
        let location = Coord {
            x: host.location.x + self.rng.gen_range(-EVENT_JITTER..=EVENT_JITTER),
            y: host.location.y + self.rng.gen_range(-EVENT_JITTER..=EVENT_JITTER),
        };
        Event::new(
            id,
            format!("{setting} {hobby} meetup"),
            host.id,
            hobby,
            location,
        )
        .map_err(|source| GenerateError::Event {
            event_id: id,
            source,
        })
    }
}

/// Write profiles to `path` in the contract CSV shape.
///
/// # Errors
/// Returns [`GenerateError::Write`] for I/O failures and
/// [`GenerateError::Serialize`] when a record cannot be encoded.
pub fn write_users_csv(path: &Utf8Path, users: &[UserProfile]) -> Result<(), GenerateError> {
    let file = fsio::create_dataset(path).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    for user in users {
        writer
            .serialize(UserRow::from(user))
            .map_err(|source| GenerateError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;
    }
    writer.flush().map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} user rows to {path}", users.len());
    Ok(())
}

/// Write events to `path` in the contract CSV shape.
///
/// # Errors
/// Returns [`GenerateError::Write`] for I/O failures and
/// [`GenerateError::Serialize`] when a record cannot be encoded.
pub fn write_events_csv(path: &Utf8Path, events: &[Event]) -> Result<(), GenerateError> {
    let file = fsio::create_dataset(path).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    for event in events {
        writer
            .serialize(EventRow::from(event))
            .map_err(|source| GenerateError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;
    }
    writer.flush().map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} event rows to {path}", events.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn users_have_contiguous_ids_and_valid_fields() {
        let users = Generator::seeded(1).users(25).expect("generation succeeds");
        assert_eq!(users.len(), 25);
        for (index, user) in users.iter().enumerate() {
            assert_eq!(user.id, index as u64);
            assert!((MIN_AGE..=MAX_AGE).contains(&user.age));
            assert!((MIN_HOBBIES..=MAX_HOBBIES).contains(&user.hobbies.len()));
        }
    }

    #[rstest]
    fn equal_seeds_reproduce_the_population() {
        let first = Generator::seeded(9).users(10).expect("generation succeeds");
        let second = Generator::seeded(9).users(10).expect("generation succeeds");
        assert_eq!(first, second);
    }

    #[rstest]
    fn events_reference_existing_hosts() {
        let mut generator = Generator::seeded(3);
        let users = generator.users(10).expect("generation succeeds");
        let events = generator.events(&users, 8).expect("generation succeeds");
        assert_eq!(events.len(), 8);
        for event in &events {
            assert!(users.iter().any(|user| user.id == event.host_id));
            assert!(ALL_HOBBIES.contains(&event.hobby.as_str()));
        }
    }

    #[rstest]
    fn events_require_a_population() {
        let err = Generator::seeded(3).events(&[], 4).unwrap_err();
        assert!(matches!(err, GenerateError::NoHosts));
    }
}
