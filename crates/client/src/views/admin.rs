//! Admin-only panels: event management, member roster and equipment.

use std::fmt;

use chrono::NaiveDate;
use rollcall_core::equipment::EquipmentType;
use rollcall_core::event::{require_text, validate_time_window, MAX_LOCATION_LENGTH, MAX_TITLE_LENGTH};
use rollcall_core::summary::EquipmentSummary;
use rollcall_core::time_format::{format_time, parse_time};
use rollcall_core::types::DbId;

use crate::error::{ClientError, ClientResult};
use crate::types::{Event, NewEvent, User};

/// Raw text inputs of the create-event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub date: String,
    pub time_from: String,
    pub time_to: String,
    pub location: String,
}

impl EventForm {
    /// Check the inputs the way the server will and build the request body.
    pub fn validate(&self) -> ClientResult<NewEvent> {
        let title = require_text("title", &self.title, MAX_TITLE_LENGTH).map_err(invalid)?;
        let location =
            require_text("location", &self.location, MAX_LOCATION_LENGTH).map_err(invalid)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ClientError::Invalid(format!("Invalid date '{}'", self.date.trim())))?;
        let time_from = parse_field_time("time_from", &self.time_from)?;
        let time_to = parse_field_time("time_to", &self.time_to)?;
        validate_time_window(time_from, time_to).map_err(invalid)?;

        Ok(NewEvent {
            title,
            date,
            time_from,
            time_to,
            location,
        })
    }
}

fn parse_field_time(field: &str, value: &str) -> ClientResult<chrono::NaiveTime> {
    parse_time(value.trim())
        .ok_or_else(|| ClientError::Invalid(format!("{field} must be HH:MM, got '{}'", value.trim())))
}

fn invalid(err: rollcall_core::error::CoreError) -> ClientError {
    ClientError::Invalid(err.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: DbId,
    pub title: String,
    pub when: String,
    pub location: String,
    pub total_participants: i64,
}

/// Event list with delete handles.
#[derive(Debug, Clone, Default)]
pub struct EventPanel {
    pub rows: Vec<EventRow>,
}

impl EventPanel {
    pub fn build(events: &[Event]) -> Self {
        let rows = events
            .iter()
            .map(|e| EventRow {
                id: e.id,
                title: e.title.clone(),
                when: format!(
                    "{} {}-{}",
                    e.date.format("%Y-%m-%d"),
                    format_time(&e.time_from),
                    format_time(&e.time_to)
                ),
                location: e.location.clone(),
                total_participants: e.total_participants,
            })
            .collect();
        Self { rows }
    }

    /// The event a delete would target, if it is still listed.
    pub fn deletable(&self, event_id: DbId) -> ClientResult<&EventRow> {
        self.rows
            .iter()
            .find(|r| r.id == event_id)
            .ok_or_else(|| ClientError::Invalid(format!("No event with id {event_id}")))
    }
}

impl fmt::Display for EventPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No events.");
        }
        let headers = ["ID", "When", "Title", "Location", "Total"].map(String::from);
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.when.clone(),
                    r.title.clone(),
                    r.location.clone(),
                    r.total_participants.to_string(),
                ]
            })
            .collect();
        super::write_table(f, &headers, &rows)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
}

impl UserRow {
    /// Admin accounts have no activation toggle.
    pub fn can_toggle(&self) -> bool {
        !self.is_admin
    }
}

/// Member roster with activation toggles.
#[derive(Debug, Clone, Default)]
pub struct UserPanel {
    pub rows: Vec<UserRow>,
}

impl UserPanel {
    pub fn build(users: &[User]) -> Self {
        let rows = users
            .iter()
            .map(|u| UserRow {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                is_admin: u.is_admin,
                is_active: u.is_active,
            })
            .collect();
        Self { rows }
    }

    /// Resolve a toggle request to the target row, refusing admin targets.
    pub fn toggle_target(&self, user_id: DbId) -> ClientResult<&UserRow> {
        let row = self
            .rows
            .iter()
            .find(|r| r.id == user_id)
            .ok_or_else(|| ClientError::Invalid(format!("No user with id {user_id}")))?;
        if !row.can_toggle() {
            return Err(ClientError::Invalid(format!(
                "{} is an admin and cannot be deactivated",
                row.name
            )));
        }
        Ok(row)
    }
}

impl fmt::Display for UserPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = ["ID", "Name", "Email", "Role", "Status"].map(String::from);
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.email.clone().unwrap_or_default(),
                    if r.is_admin { "admin" } else { "member" }.to_string(),
                    match (r.is_active, r.can_toggle()) {
                        (true, true) => "active",
                        (false, true) => "inactive",
                        (true, false) => "active (locked)",
                        (false, false) => "inactive (locked)",
                    }
                    .to_string(),
                ]
            })
            .collect();
        super::write_table(f, &headers, &rows)
    }
}

/// Who brings what to one event. Every type is listed, even when nobody
/// brings it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentRoster {
    pub entries: Vec<(EquipmentType, Vec<String>)>,
}

impl EquipmentRoster {
    pub fn build(summary: &EquipmentSummary) -> Self {
        let entries = EquipmentType::ALL
            .iter()
            .map(|kind| {
                let names = summary
                    .get(kind)
                    .map(|holders| holders.iter().map(|h| h.user_name.clone()).collect())
                    .unwrap_or_default();
                (*kind, names)
            })
            .collect();
        Self { entries }
    }
}

impl fmt::Display for EquipmentRoster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, names) in &self.entries {
            let who = if names.is_empty() {
                "nobody".to_string()
            } else {
                names.join(", ")
            };
            writeln!(f, "{:<10} {who}", format!("{}:", kind.label()))?;
        }
        Ok(())
    }
}
