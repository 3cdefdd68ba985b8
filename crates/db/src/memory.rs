//! In-memory [`DataService`] with the same semantics as the Postgres one.
//!
//! Used by the api and client test suites and by `DATA_SERVICE=memory`.
//! Every method takes the write or read lock once, so each call is atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::{DbError, DbResult};
use crate::models::attendance::{Attendance, AttendanceDetail, UpsertAttendance};
use crate::models::equipment::Equipment;
use crate::models::event::{CreateEvent, Event, EventWithAttendances, UpdateEvent};
use crate::models::user::{normalize_email, CreateUser, User, UserSummary};
use crate::service::DataService;

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: BTreeMap<DbId, User>,
    events: BTreeMap<DbId, Event>,
    attendances: BTreeMap<DbId, Attendance>,
    equipment: BTreeMap<DbId, Equipment>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn detail(&self, attendance: &Attendance) -> AttendanceDetail {
        let name = self
            .users
            .get(&attendance.user_id)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let equipment = self
            .equipment
            .values()
            .filter(|e| e.attendance_id == attendance.id)
            .cloned()
            .collect();
        AttendanceDetail {
            attendance: attendance.clone(),
            user: UserSummary {
                id: attendance.user_id,
                name,
            },
            equipment,
        }
    }

    fn attendances_for(&self, event_id: DbId) -> impl Iterator<Item = &Attendance> {
        self.attendances
            .values()
            .filter(move |a| a.event_id == event_id)
    }

    fn find_pair(&self, user_id: DbId, event_id: DbId) -> Option<&Attendance> {
        self.attendances
            .values()
            .find(|a| a.user_id == user_id && a.event_id == event_id)
    }

    fn remove_attendance(&mut self, attendance_id: DbId) {
        self.attendances.remove(&attendance_id);
        self.equipment.retain(|_, e| e.attendance_id != attendance_id);
    }
}

/// A process-local store. Cloning is not supported; share it behind an `Arc`.
#[derive(Default)]
pub struct MemoryDataService {
    tables: RwLock<Tables>,
}

impl MemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataService for MemoryDataService {
    async fn health_check(&self) -> DbResult<()> {
        Ok(())
    }

    async fn find_user_by_id(&self, id: DbId) -> DbResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let email = normalize_email(email);
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, input: &CreateUser) -> DbResult<User> {
        let email = normalize_email(&input.email);
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == email) {
            return Err(DbError::UniqueViolation {
                constraint: "uq_users_email".into(),
            });
        }
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            email,
            password_hash: input.password_hash.clone(),
            name: input.name.clone(),
            is_admin: input.is_admin,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> DbResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn set_user_active(&self, id: DbId, is_active: bool) -> DbResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            user.is_active = is_active;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn list_events(&self) -> DbResult<Vec<EventWithAttendances>> {
        let tables = self.tables.read().await;
        let mut events: Vec<&Event> = tables.events.values().collect();
        events.sort_by_key(|e| (e.date, e.time_from, e.id));

        Ok(events
            .into_iter()
            .map(|event| EventWithAttendances {
                event: event.clone(),
                attendances: tables
                    .attendances_for(event.id)
                    .map(|a| tables.detail(a))
                    .collect(),
            })
            .collect())
    }

    async fn find_event(&self, id: DbId) -> DbResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn create_event(&self, input: &CreateEvent) -> DbResult<Event> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let event = Event {
            id: tables.next_id(),
            title: input.title.clone(),
            date: input.date,
            time_from: input.time_from,
            time_to: input.time_to,
            location: input.location.clone(),
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: DbId, input: &UpdateEvent) -> DbResult<Option<Event>> {
        let mut tables = self.tables.write().await;
        Ok(tables.events.get_mut(&id).map(|event| {
            if let Some(title) = &input.title {
                event.title = title.clone();
            }
            if let Some(date) = input.date {
                event.date = date;
            }
            if let Some(time_from) = input.time_from {
                event.time_from = time_from;
            }
            if let Some(time_to) = input.time_to {
                event.time_to = time_to;
            }
            if let Some(location) = &input.location {
                event.location = location.clone();
            }
            event.updated_at = Utc::now();
            event.clone()
        }))
    }

    async fn delete_event(&self, id: DbId) -> DbResult<bool> {
        let mut tables = self.tables.write().await;
        let children: Vec<DbId> = tables.attendances_for(id).map(|a| a.id).collect();
        for attendance_id in children {
            tables.remove_attendance(attendance_id);
        }
        Ok(tables.events.remove(&id).is_some())
    }

    async fn confirmed_attendances(&self, event_id: DbId) -> DbResult<Vec<AttendanceDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendances_for(event_id)
            .filter(|a| a.status == AttendanceStatus::Confirmed)
            .map(|a| tables.detail(a))
            .collect())
    }

    async fn find_attendance(
        &self,
        user_id: DbId,
        event_id: DbId,
    ) -> DbResult<Option<AttendanceDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .find_pair(user_id, event_id)
            .map(|a| tables.detail(a)))
    }

    async fn upsert_attendance(&self, input: &UpsertAttendance) -> DbResult<AttendanceDetail> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        let attendance_id = match tables.find_pair(input.user_id, input.event_id).map(|a| a.id) {
            Some(id) => {
                if let Some(existing) = tables.attendances.get_mut(&id) {
                    existing.status = input.status;
                    existing.additional_players = input.additional_players;
                    existing.comment = input.comment.clone();
                    existing.updated_at = now;
                }
                tables.equipment.retain(|_, e| e.attendance_id != id);
                id
            }
            None => {
                let id = tables.next_id();
                tables.attendances.insert(
                    id,
                    Attendance {
                        id,
                        user_id: input.user_id,
                        event_id: input.event_id,
                        status: input.status,
                        additional_players: input.additional_players,
                        comment: input.comment.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
                id
            }
        };

        for kind in &input.equipment {
            let id = tables.next_id();
            tables.equipment.insert(
                id,
                Equipment {
                    id,
                    attendance_id,
                    kind: *kind,
                    created_at: now,
                },
            );
        }

        let attendance = tables
            .attendances
            .get(&attendance_id)
            .ok_or(DbError::Sqlx(sqlx::Error::RowNotFound))?;
        Ok(tables.detail(attendance))
    }

    async fn delete_attendance(&self, user_id: DbId, event_id: DbId) -> DbResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.find_pair(user_id, event_id).map(|a| a.id) {
            Some(id) => {
                tables.remove_attendance(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
