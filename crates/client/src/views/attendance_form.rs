//! Editing one's own answer for an event.

use std::fmt;

use rollcall_core::attendance::{AttendanceStatus, MAX_ADDITIONAL_PLAYERS};
use rollcall_core::equipment::EquipmentType;
use rollcall_core::types::DbId;

use crate::types::{AttendanceRequest, Event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceForm {
    pub event_id: DbId,
    pub event_title: String,
    pub status: AttendanceStatus,
    additional_players: i32,
    equipment: [bool; EquipmentType::ALL.len()],
    pub comment: String,
    existing: bool,
}

impl AttendanceForm {
    /// Start from the viewer's current answer, or a blank confirmation.
    pub fn for_event(event: &Event, viewer_id: DbId) -> Self {
        let mut form = Self {
            event_id: event.id,
            event_title: event.title.clone(),
            status: AttendanceStatus::Confirmed,
            additional_players: 0,
            equipment: [false; EquipmentType::ALL.len()],
            comment: String::new(),
            existing: false,
        };

        if let Some(current) = event.attendance_of(viewer_id) {
            form.existing = true;
            form.status = current.status;
            form.set_additional_players(current.additional_players);
            for kind in current.equipment_types() {
                form.set_equipment(kind, true);
            }
            form.comment = current.comment.clone().unwrap_or_default();
        }
        form
    }

    /// Whether there is a stored answer that could be withdrawn.
    pub fn has_existing(&self) -> bool {
        self.existing
    }

    pub fn additional_players(&self) -> i32 {
        self.additional_players
    }

    /// Out-of-range values are clamped to `0..=MAX_ADDITIONAL_PLAYERS`.
    pub fn set_additional_players(&mut self, players: i32) {
        self.additional_players = players.clamp(0, MAX_ADDITIONAL_PLAYERS);
    }

    pub fn set_equipment(&mut self, kind: EquipmentType, checked: bool) {
        if let Some(i) = EquipmentType::ALL.iter().position(|k| *k == kind) {
            self.equipment[i] = checked;
        }
    }

    pub fn toggle_equipment(&mut self, kind: EquipmentType) {
        let checked = self.is_checked(kind);
        self.set_equipment(kind, !checked);
    }

    pub fn is_checked(&self, kind: EquipmentType) -> bool {
        EquipmentType::ALL
            .iter()
            .position(|k| *k == kind)
            .is_some_and(|i| self.equipment[i])
    }

    /// The fixed checklist in display order.
    pub fn checklist(&self) -> impl Iterator<Item = (EquipmentType, bool)> + '_ {
        EquipmentType::ALL
            .iter()
            .zip(self.equipment.iter())
            .map(|(kind, checked)| (*kind, *checked))
    }

    /// The upsert body. A decline carries no extra players and no equipment.
    pub fn to_request(&self) -> AttendanceRequest {
        let confirmed = self.status.is_confirmed();
        let comment = self.comment.trim();
        AttendanceRequest {
            status: self.status,
            additional_players: if confirmed { self.additional_players } else { 0 },
            comment: (!comment.is_empty()).then(|| comment.to_string()),
            equipment: if confirmed {
                self.checklist()
                    .filter_map(|(kind, checked)| checked.then_some(kind))
                    .collect()
            } else {
                Vec::new()
            },
        }
    }
}

impl fmt::Display for AttendanceForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.event_title)?;
        writeln!(f, "  status:    {}", self.status)?;
        if self.status.is_confirmed() {
            writeln!(f, "  players:   +{}", self.additional_players)?;
            for (kind, checked) in self.checklist() {
                let mark = if checked { "x" } else { " " };
                writeln!(f, "  [{mark}] {}", kind.label())?;
            }
        }
        if !self.comment.trim().is_empty() {
            writeln!(f, "  comment:   {}", self.comment.trim())?;
        }
        Ok(())
    }
}
