//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use rollcall_db::models::user::User;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The active user behind a valid bearer token, freshly loaded from storage.
///
/// Missing or malformed headers, bad signatures, expired tokens, and unknown
/// or inactive users all reject with the same 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(AppError::unauthorized)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::unauthorized()
        })?;

        let user = state
            .data
            .find_user_by_id(claims.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(AppError::unauthorized)?;

        Ok(AuthUser(user))
    }
}

/// The credential of a `Bearer` authorization header. The scheme name is
/// matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
