//! Event entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use rollcall_core::time_format;
use rollcall_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::attendance::AttendanceDetail;

/// A row from the `events` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time_from: NaiveTime,
    #[serde(with = "time_format")]
    pub time_to: NaiveTime,
    pub location: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an event. Fields are expected to be validated already.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub location: String,
    pub created_by: Option<DbId>,
}

/// Partial update for an event; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub location: Option<String>,
}

/// An event with every attendance on it, each expanded with user and equipment.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithAttendances {
    #[serde(flatten)]
    pub event: Event,
    pub attendances: Vec<AttendanceDetail>,
}
