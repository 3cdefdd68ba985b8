//! Equipment rows attached to an attendance.

use rollcall_core::equipment::EquipmentType;
use rollcall_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `equipment` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub attendance_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: EquipmentType,
    pub created_at: Timestamp,
}
