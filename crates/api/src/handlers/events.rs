//! Handlers for the `/events` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use rollcall_core::error::CoreError;
use rollcall_core::event::{
    require_text, validate_time_window, MAX_LOCATION_LENGTH, MAX_TITLE_LENGTH,
};
use rollcall_core::summary::{equipment_summary, total_participants, EquipmentSummary};
use rollcall_core::time_format;
use rollcall_core::types::DbId;
use rollcall_db::models::event::{CreateEvent, Event, EventWithAttendances, UpdateEvent};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time_from: NaiveTime,
    #[serde(with = "time_format")]
    pub time_to: NaiveTime,
    pub location: String,
}

/// Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, with = "time_format::option")]
    pub time_from: Option<NaiveTime>,
    #[serde(default, with = "time_format::option")]
    pub time_to: Option<NaiveTime>,
    pub location: Option<String>,
}

/// An event as listed: attendances expanded plus the derived head count.
#[derive(Debug, Serialize)]
pub struct EventListItem {
    #[serde(flatten)]
    pub event: EventWithAttendances,
    pub total_participants: i64,
}

impl From<EventWithAttendances> for EventListItem {
    fn from(event: EventWithAttendances) -> Self {
        let total_participants = total_participants(
            event
                .attendances
                .iter()
                .map(|a| (a.attendance.status, a.attendance.additional_players)),
        );
        Self {
            event,
            total_participants,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventListItem>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub event: Event,
}

#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub equipment: EquipmentSummary,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /events
pub async fn list_events(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<EventListResponse>> {
    let events = state.data.list_events().await?;
    Ok(Json(EventListResponse {
        events: events.into_iter().map(EventListItem::from).collect(),
    }))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(input): ApiJson<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    let title = require_text("title", &input.title, MAX_TITLE_LENGTH)?;
    let location = require_text("location", &input.location, MAX_LOCATION_LENGTH)?;
    validate_time_window(input.time_from, input.time_to)?;

    let event = state
        .data
        .create_event(&CreateEvent {
            title,
            date: input.date,
            time_from: input.time_from,
            time_to: input.time_to,
            location,
            created_by: Some(admin.0.id),
        })
        .await?;

    tracing::info!(event_id = event.id, user_id = admin.0.id, "Event created");
    Ok((StatusCode::CREATED, Json(EventResponse { event })))
}

/// PATCH /events/{id}
///
/// The merged result must still satisfy the create-time rules.
pub async fn update_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateEventRequest>,
) -> AppResult<Json<EventResponse>> {
    let current = state
        .data
        .find_event(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id })?;

    let update = UpdateEvent {
        title: input
            .title
            .map(|t| require_text("title", &t, MAX_TITLE_LENGTH))
            .transpose()?,
        date: input.date,
        time_from: input.time_from,
        time_to: input.time_to,
        location: input
            .location
            .map(|l| require_text("location", &l, MAX_LOCATION_LENGTH))
            .transpose()?,
    };
    validate_time_window(
        update.time_from.unwrap_or(current.time_from),
        update.time_to.unwrap_or(current.time_to),
    )?;

    let event = state
        .data
        .update_event(id, &update)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id })?;

    tracing::info!(event_id = id, user_id = admin.0.id, "Event updated");
    Ok(Json(EventResponse { event }))
}

/// DELETE /events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !state.data.delete_event(id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Event", id }));
    }

    tracing::info!(event_id = id, user_id = admin.0.id, "Event deleted");
    Ok(Json(MessageResponse::new("Event deleted")))
}

/// GET /events/{id}/equipment
pub async fn event_equipment(
    State(state): State<AppState>,
    _auth: RequireAuth,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<EquipmentResponse>> {
    if state.data.find_event(id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Event", id }));
    }

    let attendances = state.data.confirmed_attendances(id).await?;
    let kinds: Vec<_> = attendances.iter().map(|a| a.equipment_types()).collect();
    let equipment = equipment_summary(
        attendances
            .iter()
            .zip(&kinds)
            .map(|(a, kinds)| a.summary_input(kinds)),
    );

    Ok(Json(EquipmentResponse { equipment }))
}
