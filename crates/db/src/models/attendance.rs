//! Attendance entity model and DTOs.

use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::equipment::EquipmentType;
use rollcall_core::summary::SummaryInput;
use rollcall_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::equipment::Equipment;
use super::user::UserSummary;

/// A row from the `attendances` table. Unique per `(user_id, event_id)`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    pub status: AttendanceStatus,
    pub additional_players: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Attendance joined with the attending user's name.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceUserRow {
    #[sqlx(flatten)]
    pub attendance: Attendance,
    pub user_name: String,
}

/// Attendance expanded with its user and equipment, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceDetail {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub user: UserSummary,
    pub equipment: Vec<Equipment>,
}

impl AttendanceDetail {
    pub fn equipment_types(&self) -> Vec<EquipmentType> {
        self.equipment.iter().map(|e| e.kind).collect()
    }

    /// View of this attendance for [`rollcall_core::summary::equipment_summary`].
    pub fn summary_input<'a>(&'a self, equipment: &'a [EquipmentType]) -> SummaryInput<'a> {
        SummaryInput {
            user_id: self.attendance.user_id,
            user_name: &self.user.name,
            status: self.attendance.status,
            equipment,
        }
    }
}

/// Insert-or-update request keyed by `(user_id, event_id)`.
///
/// `equipment` fully replaces whatever the attendance had before; callers pass
/// an empty list for declined attendances.
#[derive(Debug, Clone)]
pub struct UpsertAttendance {
    pub user_id: DbId,
    pub event_id: DbId,
    pub status: AttendanceStatus,
    pub additional_players: i32,
    pub comment: Option<String>,
    pub equipment: Vec<EquipmentType>,
}
