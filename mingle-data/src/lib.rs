//! Dataset access and generation for the Mingle matching engine.
//!
//! Responsibilities:
//! - Load the users and events CSV tables into validated core types.
//! - Generate seeded synthetic datasets matching the external contract.
//! - Encapsulate the tabular serialization format and its quirks.
//!
//! Boundaries:
//! - Do not encode matching rules (they live in `mingle-core`).
//! - Treat malformed input as fatal at load time; there is no per-request
//!   recovery for integrity failures.
//!
//! Invariants:
//! - No global mutable state; loaders return owned values.
//! - The CSV shapes stay byte-compatible with the original pandas pipeline
//!   (`hobbies` as a quoted Python list, booleans as `True`/`False`).

mod fsio;
mod generate;
mod load;

pub use generate::{ALL_HOBBIES, GenerateError, Generator, write_events_csv, write_users_csv};
pub use load::{LoadError, load_store, read_events, read_users};
