//! Postgres-backed [`DataService`].

use async_trait::async_trait;
use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::types::DbId;

use crate::error::{DbError, DbResult};
use crate::models::attendance::{AttendanceDetail, UpsertAttendance};
use crate::models::event::{CreateEvent, Event, EventWithAttendances, UpdateEvent};
use crate::models::user::{CreateUser, User};
use crate::repositories::{AttendanceRepo, EquipmentRepo, EventRepo, UserRepo};
use crate::service::DataService;
use crate::DbPool;

/// Data service over a shared connection pool.
#[derive(Clone)]
pub struct PgDataService {
    pool: DbPool,
}

impl PgDataService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open a pool, verify connectivity and apply pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> DbResult<Self> {
        let pool = crate::create_pool(database_url, max_connections).await?;
        crate::health_check(&pool).await?;
        crate::run_migrations(&pool).await?;
        tracing::info!(max_connections, "Postgres data service ready");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl DataService for PgDataService {
    async fn health_check(&self) -> DbResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn find_user_by_id(&self, id: DbId) -> DbResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn create_user(&self, input: &CreateUser) -> DbResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn list_users(&self) -> DbResult<Vec<User>> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn set_user_active(&self, id: DbId, is_active: bool) -> DbResult<Option<User>> {
        Ok(UserRepo::set_active(&self.pool, id, is_active).await?)
    }

    async fn list_events(&self) -> DbResult<Vec<EventWithAttendances>> {
        let events = EventRepo::list(&self.pool).await?;
        let ids: Vec<DbId> = events.iter().map(|e| e.id).collect();
        let mut attendances = AttendanceRepo::list_for_events(&self.pool, &ids, None).await?;

        let mut result = Vec::with_capacity(events.len());
        for event in events {
            let (own, rest): (Vec<_>, Vec<_>) = attendances
                .into_iter()
                .partition(|a| a.attendance.event_id == event.id);
            attendances = rest;
            result.push(EventWithAttendances {
                event,
                attendances: own,
            });
        }
        Ok(result)
    }

    async fn find_event(&self, id: DbId) -> DbResult<Option<Event>> {
        Ok(EventRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_event(&self, input: &CreateEvent) -> DbResult<Event> {
        Ok(EventRepo::create(&self.pool, input).await?)
    }

    async fn update_event(&self, id: DbId, input: &UpdateEvent) -> DbResult<Option<Event>> {
        Ok(EventRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_event(&self, id: DbId) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;
        let equipment = EquipmentRepo::delete_for_event(&mut *tx, id).await?;
        let attendances = AttendanceRepo::delete_for_event(&mut *tx, id).await?;
        let deleted = EventRepo::delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::debug!(event_id = id, attendances, equipment, deleted, "Event removed");
        Ok(deleted)
    }

    async fn confirmed_attendances(&self, event_id: DbId) -> DbResult<Vec<AttendanceDetail>> {
        Ok(AttendanceRepo::list_for_events(
            &self.pool,
            &[event_id],
            Some(AttendanceStatus::Confirmed),
        )
        .await?)
    }

    async fn find_attendance(
        &self,
        user_id: DbId,
        event_id: DbId,
    ) -> DbResult<Option<AttendanceDetail>> {
        Ok(AttendanceRepo::find_detailed(&self.pool, user_id, event_id).await?)
    }

    async fn upsert_attendance(&self, input: &UpsertAttendance) -> DbResult<AttendanceDetail> {
        let mut tx = self.pool.begin().await?;
        let attendance = AttendanceRepo::upsert(&mut *tx, input).await?;
        EquipmentRepo::delete_for_attendance(&mut *tx, attendance.id).await?;
        if !input.equipment.is_empty() {
            EquipmentRepo::insert_many(&mut *tx, attendance.id, &input.equipment).await?;
        }
        tx.commit().await?;

        AttendanceRepo::find_detailed(&self.pool, input.user_id, input.event_id)
            .await?
            .ok_or(DbError::Sqlx(sqlx::Error::RowNotFound))
    }

    async fn delete_attendance(&self, user_id: DbId, event_id: DbId) -> DbResult<bool> {
        // Equipment goes with the attendance through ON DELETE CASCADE.
        let mut conn = self.pool.acquire().await?;
        Ok(AttendanceRepo::delete_for_user_event(&mut *conn, user_id, event_id).await?)
    }
}
