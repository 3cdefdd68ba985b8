//! Handlers for the `/attendance/{eventId}` resource.
//!
//! The caller always acts on their own attendance; there is no way to submit
//! on behalf of someone else.

use axum::extract::State;
use axum::Json;
use rollcall_core::attendance::{normalize_comment, resolve_additional_players, AttendanceStatus};
use rollcall_core::equipment::{dedup_equipment, EquipmentType};
use rollcall_core::error::CoreError;
use rollcall_core::types::DbId;
use rollcall_db::models::attendance::{AttendanceDetail, UpsertAttendance};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::rbac::RequireAuth;
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    pub status: String,
    pub additional_players: Option<i32>,
    pub comment: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub attendance: AttendanceDetail,
}

/// POST /attendance/{eventId}
///
/// Insert or replace the caller's attendance. Equipment is stored only for
/// confirmed attendances; anything recorded before is dropped either way.
pub async fn submit_attendance(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(event_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<AttendanceRequest>,
) -> AppResult<Json<AttendanceResponse>> {
    let status: AttendanceStatus = input.status.parse()?;
    let additional_players = resolve_additional_players(input.additional_players)?;
    let comment = normalize_comment(input.comment)?;
    let requested = input
        .equipment
        .iter()
        .map(|s| s.parse::<EquipmentType>())
        .collect::<Result<Vec<_>, _>>()?;
    let equipment = if status.is_confirmed() {
        dedup_equipment(&requested)
    } else {
        Vec::new()
    };

    if state.data.find_event(event_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }
        .into());
    }

    let attendance = state
        .data
        .upsert_attendance(&UpsertAttendance {
            user_id: user.0.id,
            event_id,
            status,
            additional_players,
            comment,
            equipment,
        })
        .await?;

    tracing::info!(
        user_id = user.0.id,
        event_id,
        status = %status,
        additional_players,
        "Attendance submitted"
    );
    Ok(Json(AttendanceResponse { attendance }))
}

/// DELETE /attendance/{eventId}
///
/// Succeeds whether or not the caller had an attendance.
pub async fn delete_attendance(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(event_id): ApiPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let existed = state.data.delete_attendance(user.0.id, event_id).await?;
    tracing::info!(user_id = user.0.id, event_id, existed, "Attendance deleted");
    Ok(Json(MessageResponse::new("Attendance deleted")))
}
