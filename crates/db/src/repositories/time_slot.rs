use crate::models::DbTimeSlot;
use chrono::Utc;
use eyre::Result;
use fieldsync_core::errors::{DispatchError, DispatchResult};
use fieldsync_core::models::time_slot::slot_label;
use fieldsync_core::models::time_window::TimeWindow;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_time_slot(
    pool: &Pool<Postgres>,
    window: TimeWindow,
    display_order: Option<i32>,
) -> DispatchResult<DbTimeSlot> {
    // Refuse windows that overlap an existing active slot
    let overlapping: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM time_slots
        WHERE is_active = TRUE
          AND start_minute < $2
          AND end_minute > $1
        "#,
    )
    .bind(i32::from(window.start))
    .bind(i32::from(window.end))
    .fetch_one(pool)
    .await
    .map_err(|err| DispatchError::Database(err.into()))?;

    if overlapping > 0 {
        return Err(DispatchError::Validation(format!(
            "Time slot {window} overlaps an existing active slot"
        )));
    }

    let display_order = match display_order {
        Some(order) => order,
        None => {
            let max_order: Option<i32> =
                sqlx::query_scalar("SELECT MAX(display_order) FROM time_slots")
                    .fetch_one(pool)
                    .await
                    .map_err(|err| DispatchError::Database(err.into()))?;
            max_order.unwrap_or(0) + 1
        }
    };

    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating time slot: id={}, window={}", id, window);

    let slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, label, start_minute, end_minute, display_order, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5, TRUE, $6)
        RETURNING id, label, start_minute, end_minute, display_order, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(slot_label(window.start, window.end))
    .bind(i32::from(window.start))
    .bind(i32::from(window.end))
    .bind(display_order)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|err| DispatchError::Database(err.into()))?;

    Ok(slot)
}

pub async fn get_time_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, label, start_minute, end_minute, display_order, is_active, created_at
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn list_active_time_slots(pool: &Pool<Postgres>) -> Result<Vec<DbTimeSlot>> {
    let slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, label, start_minute, end_minute, display_order, is_active, created_at
        FROM time_slots
        WHERE is_active = TRUE
        ORDER BY display_order ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Deactivates a slot. Slots referenced by any job are immutable; they can
/// only be removed once the jobs pointing at them are gone.
pub async fn delete_time_slot(pool: &Pool<Postgres>, id: Uuid) -> DispatchResult<()> {
    let referencing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE time_slot_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(|err| DispatchError::Database(err.into()))?;

    if referencing > 0 {
        return Err(DispatchError::Validation(format!(
            "Cannot delete time slot: it is referenced by {referencing} job(s)"
        )));
    }

    let result = sqlx::query("DELETE FROM time_slots WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|err| DispatchError::Database(err.into()))?;

    if result.rows_affected() == 0 {
        return Err(DispatchError::NotFound(format!("Time slot {id}")));
    }

    Ok(())
}
