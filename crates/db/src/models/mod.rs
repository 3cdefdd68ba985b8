//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Where the entity is editable, an update DTO with all-`Option` fields

pub mod attendance;
pub mod equipment;
pub mod event;
pub mod user;
