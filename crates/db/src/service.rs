//! The data service seam between handlers and storage.

use async_trait::async_trait;
use rollcall_core::types::DbId;

use crate::error::DbResult;
use crate::models::attendance::{AttendanceDetail, UpsertAttendance};
use crate::models::event::{CreateEvent, Event, EventWithAttendances, UpdateEvent};
use crate::models::user::{CreateUser, User};

/// Everything the backend needs from persistence.
///
/// Implementations own transactional guarantees: each method either applies
/// fully or not at all.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> DbResult<()>;

    /// Release pooled resources. Further calls may fail.
    async fn close(&self) {}

    // --- users ---

    async fn find_user_by_id(&self, id: DbId) -> DbResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>>;
    /// Fails with [`DbError::UniqueViolation`](crate::DbError::UniqueViolation)
    /// when the email is taken.
    async fn create_user(&self, input: &CreateUser) -> DbResult<User>;
    /// All users ordered by name.
    async fn list_users(&self) -> DbResult<Vec<User>>;
    async fn set_user_active(&self, id: DbId, is_active: bool) -> DbResult<Option<User>>;

    // --- events ---

    /// All events, earliest first, each with its attendances expanded.
    async fn list_events(&self) -> DbResult<Vec<EventWithAttendances>>;
    async fn find_event(&self, id: DbId) -> DbResult<Option<Event>>;
    async fn create_event(&self, input: &CreateEvent) -> DbResult<Event>;
    async fn update_event(&self, id: DbId, input: &UpdateEvent) -> DbResult<Option<Event>>;
    /// Remove equipment, attendances, then the event. Returns whether the
    /// event existed.
    async fn delete_event(&self, id: DbId) -> DbResult<bool>;

    // --- attendance ---

    /// Confirmed attendances of one event with user and equipment expanded.
    async fn confirmed_attendances(&self, event_id: DbId) -> DbResult<Vec<AttendanceDetail>>;
    async fn find_attendance(
        &self,
        user_id: DbId,
        event_id: DbId,
    ) -> DbResult<Option<AttendanceDetail>>;
    /// Insert or update the `(user, event)` attendance and replace its
    /// equipment with `input.equipment`.
    async fn upsert_attendance(&self, input: &UpsertAttendance) -> DbResult<AttendanceDetail>;
    /// Returns whether an attendance existed.
    async fn delete_attendance(&self, user_id: DbId, event_id: DbId) -> DbResult<bool>;
}
