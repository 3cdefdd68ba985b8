//! Repository for the `equipment` table.

use std::collections::HashMap;

use rollcall_core::equipment::EquipmentType;
use rollcall_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::equipment::Equipment;

const COLUMNS: &str = "id, attendance_id, type, created_at";

pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Load equipment for many attendances at once, grouped by attendance id.
    pub async fn list_for_attendances(
        pool: &PgPool,
        attendance_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Equipment>>, sqlx::Error> {
        if attendance_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM equipment WHERE attendance_id = ANY($1) ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Equipment>(&query)
            .bind(attendance_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Equipment>> = HashMap::new();
        for row in rows {
            grouped.entry(row.attendance_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Insert one row per item, in order.
    pub async fn insert_many(
        conn: &mut PgConnection,
        attendance_id: DbId,
        items: &[EquipmentType],
    ) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (attendance_id, type) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(items.len());
        for kind in items {
            let row = sqlx::query_as::<_, Equipment>(&query)
                .bind(attendance_id)
                .bind(*kind)
                .fetch_one(&mut *conn)
                .await?;
            inserted.push(row);
        }
        Ok(inserted)
    }

    /// Remove every equipment row of one attendance. Returns the number removed.
    pub async fn delete_for_attendance(
        conn: &mut PgConnection,
        attendance_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment WHERE attendance_id = $1")
            .bind(attendance_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Remove every equipment row attached to any attendance of an event.
    pub async fn delete_for_event(
        conn: &mut PgConnection,
        event_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM equipment
             WHERE attendance_id IN (SELECT id FROM attendances WHERE event_id = $1)",
        )
        .bind(event_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
