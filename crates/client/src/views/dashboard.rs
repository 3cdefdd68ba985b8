//! The attendance grid: active users down the side, events across the top.

use std::fmt;

use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::equipment::EquipmentType;
use rollcall_core::time_format::format_time;
use rollcall_core::types::DbId;

use crate::types::{Attendance, Event, User};

/// What one user said about one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellState {
    /// `None` until the user has answered.
    pub status: Option<AttendanceStatus>,
    pub additional_players: i32,
    pub equipment: Vec<EquipmentType>,
    pub comment: Option<String>,
}

impl CellState {
    fn from_attendance(attendance: Option<&Attendance>) -> Self {
        match attendance {
            Some(a) => Self {
                status: Some(a.status),
                additional_players: a.additional_players,
                equipment: a.equipment_types(),
                comment: a.comment.clone(),
            },
            None => Self::default(),
        }
    }

    /// Compact badge, e.g. `yes +2 BP *`.
    pub fn badge(&self) -> String {
        let mut out = match self.status {
            Some(AttendanceStatus::Confirmed) => "yes".to_string(),
            Some(AttendanceStatus::Declined) => "no".to_string(),
            None => "-".to_string(),
        };
        if self.status == Some(AttendanceStatus::Confirmed) {
            if self.additional_players > 0 {
                out.push_str(&format!(" +{}", self.additional_players));
            }
            if !self.equipment.is_empty() {
                out.push(' ');
                out.extend(self.equipment.iter().filter_map(|e| e.label().chars().next()));
            }
        }
        if self.comment.is_some() {
            out.push_str(" *");
        }
        out
    }
}

/// The viewer's own cells are editable; everyone else's are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Own(CellState),
    Other(CellState),
}

impl Cell {
    pub fn state(&self) -> &CellState {
        match self {
            Self::Own(s) | Self::Other(s) => s,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Own(_))
    }

    fn render(&self) -> String {
        match self {
            Self::Own(s) => format!("[{}]", s.badge()),
            Self::Other(s) => s.badge(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardColumn {
    pub event_id: DbId,
    /// Date, time window, title and location, e.g. `01.06. 18:00-19:30 Training @ Field A`.
    pub heading: String,
    pub location: String,
    pub total_participants: i64,
}

#[derive(Debug, Clone)]
pub struct DashboardRow {
    pub user_id: DbId,
    pub name: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub columns: Vec<DashboardColumn>,
    pub rows: Vec<DashboardRow>,
}

impl Dashboard {
    /// Inactive users are left out; events keep the order the server sent.
    pub fn build(events: &[Event], users: &[User], viewer_id: DbId) -> Self {
        let columns = events
            .iter()
            .map(|e| DashboardColumn {
                event_id: e.id,
                heading: format!(
                    "{} {}-{} {} @ {}",
                    e.date.format("%d.%m."),
                    format_time(&e.time_from),
                    format_time(&e.time_to),
                    e.title,
                    e.location
                ),
                location: e.location.clone(),
                total_participants: e.total_participants,
            })
            .collect();

        let rows = users
            .iter()
            .filter(|u| u.is_active)
            .map(|u| DashboardRow {
                user_id: u.id,
                name: u.name.clone(),
                cells: events
                    .iter()
                    .map(|e| {
                        let state = CellState::from_attendance(e.attendance_of(u.id));
                        if u.id == viewer_id {
                            Cell::Own(state)
                        } else {
                            Cell::Other(state)
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { columns, rows }
    }

    pub fn cell(&self, user_id: DbId, event_id: DbId) -> Option<&Cell> {
        let col = self.columns.iter().position(|c| c.event_id == event_id)?;
        self.rows
            .iter()
            .find(|r| r.user_id == user_id)
            .and_then(|r| r.cells.get(col))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No upcoming events.");
        }

        let mut headers = vec!["Player".to_string()];
        headers.extend(self.columns.iter().map(|c| c.heading.clone()));

        let mut rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                let mut line = vec![r.name.clone()];
                line.extend(r.cells.iter().map(Cell::render));
                line
            })
            .collect();

        let mut totals = vec!["Total".to_string()];
        totals.extend(self.columns.iter().map(|c| c.total_participants.to_string()));
        rows.push(totals);

        super::write_table(f, &headers, &rows)
    }
}
