//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use rollcall_core::error::CoreError;
use rollcall_core::types::DbId;
use rollcall_db::models::user::User;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::UserResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserStatusResponse {
    pub user: UserResponse,
}

/// GET /users
///
/// Every authenticated user may list the roster; emails are only shown to admins.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> AppResult<Json<UserListResponse>> {
    let project: fn(&User) -> UserResponse = if caller.is_admin() {
        UserResponse::full
    } else {
        UserResponse::without_email
    };

    let users = state.data.list_users().await?;
    Ok(Json(UserListResponse {
        users: users.iter().map(project).collect(),
    }))
}

/// PATCH /users/{id}/status
pub async fn update_user_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateStatusRequest>,
) -> AppResult<Json<UserStatusResponse>> {
    if id == admin.0.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot change your own status".into(),
        )));
    }

    let target = state
        .data
        .find_user_by_id(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    if target.is_admin && !input.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin accounts cannot be deactivated".into(),
        )));
    }

    let user = state
        .data
        .set_user_active(id, input.is_active)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    tracing::info!(
        user_id = id,
        admin_id = admin.0.id,
        is_active = input.is_active,
        "User status changed"
    );
    Ok(Json(UserStatusResponse {
        user: UserResponse::full(&user),
    }))
}
