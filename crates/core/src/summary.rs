//! Read-time aggregations over an event's attendances.
//!
//! Both values are derived on every read and never stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attendance::AttendanceStatus;
use crate::equipment::EquipmentType;
use crate::types::DbId;

/// Sum of `1 + additional_players` over confirmed attendances.
///
/// Declined attendances contribute nothing regardless of their player count.
pub fn total_participants<I>(attendances: I) -> i64
where
    I: IntoIterator<Item = (AttendanceStatus, i32)>,
{
    attendances
        .into_iter()
        .filter(|(status, _)| status.is_confirmed())
        .map(|(_, extra)| 1 + i64::from(extra.max(0)))
        .sum()
}

/// One attendee who committed to bring a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentHolder {
    pub user_id: DbId,
    pub user_name: String,
}

/// Equipment type -> attendees bringing it. Types nobody brings are absent.
pub type EquipmentSummary = BTreeMap<EquipmentType, Vec<EquipmentHolder>>;

/// A confirmed-or-not attendance, reduced to what the summary needs.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInput<'a> {
    pub user_id: DbId,
    pub user_name: &'a str,
    pub status: AttendanceStatus,
    pub equipment: &'a [EquipmentType],
}

/// Group equipment by type across confirmed attendances.
///
/// Holders keep the order in which attendances are supplied.
pub fn equipment_summary<'a, I>(attendances: I) -> EquipmentSummary
where
    I: IntoIterator<Item = SummaryInput<'a>>,
{
    let mut summary = EquipmentSummary::new();
    for attendance in attendances {
        if !attendance.status.is_confirmed() {
            continue;
        }
        for kind in attendance.equipment {
            summary.entry(*kind).or_default().push(EquipmentHolder {
                user_id: attendance.user_id,
                user_name: attendance.user_name.to_string(),
            });
        }
    }
    summary
}
