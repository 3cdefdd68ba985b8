//! Wire types exchanged with the API.

use chrono::{NaiveDate, NaiveTime};
use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::equipment::EquipmentType;
use rollcall_core::summary::EquipmentSummary;
use rollcall_core::time_format;
use rollcall_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A user as the server projects it. `email` is only present for admins and
/// for the user themselves.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: DbId,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRef {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquipmentItem {
    pub id: DbId,
    #[serde(rename = "type")]
    pub kind: EquipmentType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attendance {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    pub status: AttendanceStatus,
    pub additional_players: i32,
    pub comment: Option<String>,
    pub user: UserRef,
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,
}

impl Attendance {
    pub fn equipment_types(&self) -> Vec<EquipmentType> {
        self.equipment.iter().map(|e| e.kind).collect()
    }
}

/// An event as listed. Freshly created or updated events come back without
/// attendances and with a zero total.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time_from: NaiveTime,
    #[serde(with = "time_format")]
    pub time_to: NaiveTime,
    pub location: String,
    #[serde(default)]
    pub created_by: Option<DbId>,
    #[serde(default)]
    pub attendances: Vec<Attendance>,
    #[serde(default)]
    pub total_participants: i64,
}

impl Event {
    pub fn attendance_of(&self, user_id: DbId) -> Option<&Attendance> {
        self.attendances.iter().find(|a| a.user_id == user_id)
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Registration<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub time_from: NaiveTime,
    #[serde(with = "time_format")]
    pub time_to: NaiveTime,
    pub location: String,
}

/// Partial event edit; `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", with = "time_format::option")]
    pub time_from: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none", with = "time_format::option")]
    pub time_to: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRequest {
    pub status: AttendanceStatus,
    pub additional_players: i32,
    pub comment: Option<String>,
    pub equipment: Vec<EquipmentType>,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersEnvelope {
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventEnvelope {
    pub event: Event,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsEnvelope {
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttendanceEnvelope {
    pub attendance: Attendance,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EquipmentEnvelope {
    pub equipment: EquipmentSummary,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message: String,
}
