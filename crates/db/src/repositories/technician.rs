use crate::models::DbTechnician;
use chrono::Utc;
use eyre::Result;
use fieldsync_core::errors::{DispatchError, DispatchResult};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_technician(
    pool: &Pool<Postgres>,
    name: &str,
    phone: &str,
    work_start_minute: Option<u16>,
    work_end_minute: Option<u16>,
    is_active: bool,
) -> DispatchResult<DbTechnician> {
    if let (Some(start), Some(end)) = (work_start_minute, work_end_minute) {
        if start >= end {
            return Err(DispatchError::Validation(
                "Work end time must be after start time".to_string(),
            ));
        }
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating technician: id={}, name={}", id, name);

    let technician = sqlx::query_as::<_, DbTechnician>(
        r#"
        INSERT INTO technicians (id, name, phone, is_active, work_start_minute, work_end_minute, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, phone, is_active, work_start_minute, work_end_minute, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(phone)
    .bind(is_active)
    .bind(work_start_minute.map(i32::from))
    .bind(work_end_minute.map(i32::from))
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|err| match unique_violation(&err) {
        true => DispatchError::Validation(
            "Technician with this phone number already exists".to_string(),
        ),
        false => DispatchError::Database(err.into()),
    })?;

    Ok(technician)
}

pub async fn get_technician_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbTechnician>> {
    let technician = sqlx::query_as::<_, DbTechnician>(
        r#"
        SELECT id, name, phone, is_active, work_start_minute, work_end_minute, created_at
        FROM technicians
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(technician)
}

pub async fn list_active_technicians(pool: &Pool<Postgres>) -> Result<Vec<DbTechnician>> {
    let technicians = sqlx::query_as::<_, DbTechnician>(
        r#"
        SELECT id, name, phone, is_active, work_start_minute, work_end_minute, created_at
        FROM technicians
        WHERE is_active = TRUE
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(technicians)
}

pub async fn count_technicians(pool: &Pool<Postgres>) -> Result<(i64, i64)> {
    let (total, active): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active = TRUE)
        FROM technicians
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok((total, active))
}

pub(crate) fn unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
