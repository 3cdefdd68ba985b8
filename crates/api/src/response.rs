//! Public projections of rows returned by handlers.

use rollcall_core::types::{DbId, Timestamp};
use rollcall_db::models::user::User;
use serde::Serialize;

/// The only user shape that leaves the server. Never carries the hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub name: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Projection for the user themselves or for an admin.
    pub fn full(user: &User) -> Self {
        Self {
            email: Some(user.email.clone()),
            ..Self::without_email(user)
        }
    }

    /// Projection for other non-admin callers.
    pub fn without_email(user: &User) -> Self {
        Self {
            id: user.id,
            email: None,
            name: user.name.clone(),
            is_admin: user.is_admin,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
