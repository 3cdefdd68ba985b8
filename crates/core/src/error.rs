//! Domain error type shared by the db, api and client layers.

use crate::types::DbId;

/// Errors raised by domain rules and handlers, independent of transport.
///
/// The api crate maps each variant onto an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity (event, user, attendance) does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain rule (time window, player count, field length).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write would violate a uniqueness rule (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid or expired credential, or inactive account.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to perform the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
