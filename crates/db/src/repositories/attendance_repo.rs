//! Repository for the `attendances` table.

use rollcall_core::attendance::AttendanceStatus;
use rollcall_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use super::equipment_repo::EquipmentRepo;
use crate::models::attendance::{Attendance, AttendanceDetail, AttendanceUserRow, UpsertAttendance};
use crate::models::user::UserSummary;

const COLUMNS: &str =
    "id, user_id, event_id, status, additional_players, comment, created_at, updated_at";

/// Same columns, qualified for the `attendances a JOIN users u` queries.
const JOINED_COLUMNS: &str = "a.id, a.user_id, a.event_id, a.status, a.additional_players, \
     a.comment, a.created_at, a.updated_at, u.name AS user_name";

pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Insert the attendance for `(user_id, event_id)`, or update it in place
    /// if one exists. Relies on `uq_attendances_user_event`, so concurrent
    /// submissions for the same pair can never produce two rows.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &UpsertAttendance,
    ) -> Result<Attendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendances (user_id, event_id, status, additional_players, comment)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_attendances_user_event DO UPDATE SET
                status = EXCLUDED.status,
                additional_players = EXCLUDED.additional_players,
                comment = EXCLUDED.comment,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.user_id)
            .bind(input.event_id)
            .bind(input.status)
            .bind(input.additional_players)
            .bind(&input.comment)
            .fetch_one(conn)
            .await
    }

    /// Detailed attendances for the given events, in submission order.
    ///
    /// With `status` set, only attendances with that status are returned.
    pub async fn list_for_events(
        pool: &PgPool,
        event_ids: &[DbId],
        status: Option<AttendanceStatus>,
    ) -> Result<Vec<AttendanceDetail>, sqlx::Error> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM attendances a
             JOIN users u ON u.id = a.user_id
             WHERE a.event_id = ANY($1)
               AND ($2::attendance_status IS NULL OR a.status = $2)
             ORDER BY a.created_at, a.id"
        );
        let rows = sqlx::query_as::<_, AttendanceUserRow>(&query)
            .bind(event_ids)
            .bind(status)
            .fetch_all(pool)
            .await?;
        Self::expand(pool, rows).await
    }

    /// The detailed attendance of one user for one event, if any.
    pub async fn find_detailed(
        pool: &PgPool,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<Option<AttendanceDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM attendances a
             JOIN users u ON u.id = a.user_id
             WHERE a.user_id = $1 AND a.event_id = $2"
        );
        let row = sqlx::query_as::<_, AttendanceUserRow>(&query)
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Self::expand(pool, vec![row]).await?.pop())
    }

    /// Delete the attendance of `(user_id, event_id)`. Returns `true` if a row
    /// was removed.
    pub async fn delete_for_user_event(
        conn: &mut PgConnection,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendances WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every attendance of an event. Returns the number removed.
    pub async fn delete_for_event(
        conn: &mut PgConnection,
        event_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendances WHERE event_id = $1")
            .bind(event_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Attach equipment to joined rows with a single extra query.
    async fn expand(
        pool: &PgPool,
        rows: Vec<AttendanceUserRow>,
    ) -> Result<Vec<AttendanceDetail>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.attendance.id).collect();
        let mut equipment = EquipmentRepo::list_for_attendances(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| AttendanceDetail {
                user: UserSummary {
                    id: row.attendance.user_id,
                    name: row.user_name,
                },
                equipment: equipment.remove(&row.attendance.id).unwrap_or_default(),
                attendance: row.attendance,
            })
            .collect())
    }
}
