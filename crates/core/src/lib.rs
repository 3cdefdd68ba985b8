//! Domain types and pure rules for the Rollcall attendance tracker.
//!
//! Nothing in this crate touches the network or the database; the db and api
//! crates build on these types.

pub mod attendance;
pub mod equipment;
pub mod error;
pub mod event;
pub mod summary;
pub mod time_format;
pub mod types;
