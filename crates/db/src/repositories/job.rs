use crate::models::{DbJob, DbJobCounts, DbJobListing, JobInsert};
use crate::repositories::technician::unique_violation;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use fieldsync_core::errors::{DispatchError, DispatchResult};
use fieldsync_core::models::job::{JobFilter, JobStatus};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

const JOB_COLUMNS: &str = "id, customer_name, customer_phone, customer_email, job_description, \
     service_address, street, city, state, state_code, zip_code, latitude, longitude, \
     scheduled_date, time_slot_id, technician_id, status, created_at, updated_at";

/// Inserts a new ASSIGNED job. The partial unique index on
/// `(technician_id, scheduled_date, time_slot_id) WHERE status = 'ASSIGNED'`
/// makes this the serialization point for concurrent scheduling requests:
/// the losing insert surfaces as `DoubleBooked`.
pub async fn insert_job(pool: &Pool<Postgres>, data: &JobInsert) -> DispatchResult<DbJob> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Inserting job: id={}, technician={}, date={}, slot={}",
        id,
        data.technician_id,
        data.scheduled_date,
        data.time_slot_id
    );

    let job = sqlx::query_as::<_, DbJob>(&format!(
        r#"
        INSERT INTO jobs (
            id, customer_name, customer_phone, customer_email, job_description,
            service_address, street, city, state, state_code, zip_code,
            latitude, longitude, scheduled_date, time_slot_id, technician_id,
            status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $18)
        RETURNING {JOB_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&data.customer_name)
    .bind(&data.customer_phone)
    .bind(&data.customer_email)
    .bind(&data.job_description)
    .bind(&data.service_address)
    .bind(&data.street)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.state_code)
    .bind(&data.zip_code)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(data.scheduled_date)
    .bind(data.time_slot_id)
    .bind(data.technician_id)
    .bind(JobStatus::Assigned.as_str())
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|err| {
        if unique_violation(&err) {
            DispatchError::DoubleBooked
        } else {
            DispatchError::Database(err.into())
        }
    })?;

    Ok(job)
}

/// The double-booking pre-check: any ASSIGNED job for the triple blocks.
/// COMPLETED jobs in the same slot do not, so a slot is reusable once its
/// job has finished.
pub async fn find_conflicting_job(
    pool: &Pool<Postgres>,
    technician_id: Uuid,
    scheduled_date: NaiveDate,
    time_slot_id: Uuid,
) -> Result<Option<DbJob>> {
    let job = sqlx::query_as::<_, DbJob>(&format!(
        r#"
        SELECT {JOB_COLUMNS}
        FROM jobs
        WHERE technician_id = $1
          AND scheduled_date = $2
          AND time_slot_id = $3
          AND status = 'ASSIGNED'
        "#
    ))
    .bind(technician_id)
    .bind(scheduled_date)
    .bind(time_slot_id)
    .fetch_optional(pool)
    .await?;

    Ok(job)
}

/// Technicians that already hold an ASSIGNED job for the date and slot.
pub async fn booked_technician_ids(
    pool: &Pool<Postgres>,
    scheduled_date: NaiveDate,
    time_slot_id: Uuid,
) -> Result<Vec<Uuid>> {
    let ids: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT technician_id
        FROM jobs
        WHERE scheduled_date = $1
          AND time_slot_id = $2
          AND status = 'ASSIGNED'
        "#,
    )
    .bind(scheduled_date)
    .bind(time_slot_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

fn listing_select() -> String {
    let job_columns: String = JOB_COLUMNS
        .split(", ")
        .map(|c| format!("j.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {job_columns}, \
         s.start_minute AS slot_start_minute, s.end_minute AS slot_end_minute, \
         t.name AS technician_name \
         FROM jobs j \
         JOIN time_slots s ON s.id = j.time_slot_id \
         JOIN technicians t ON t.id = j.technician_id \
         WHERE 1=1"
    )
}

/// Appends the typed filter to a query builder. Text fields match
/// case-insensitive contains, ids and status match exactly, the scheduled
/// date is an inclusive range, and `search` ORs across customer, address,
/// and technician-name columns.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    if let Some(city) = &filter.city {
        builder.push(" AND j.city ILIKE ");
        builder.push_bind(format!("%{city}%"));
    }
    if let Some(state) = &filter.state {
        builder.push(" AND (j.state ILIKE ");
        builder.push_bind(format!("%{state}%"));
        builder.push(" OR j.state_code ILIKE ");
        builder.push_bind(state.clone());
        builder.push(")");
    }
    if let Some(zip_code) = &filter.zip_code {
        builder.push(" AND j.zip_code = ");
        builder.push_bind(zip_code.clone());
    }
    if let Some(customer_name) = &filter.customer_name {
        builder.push(" AND j.customer_name ILIKE ");
        builder.push_bind(format!("%{customer_name}%"));
    }
    if let Some(customer_phone) = &filter.customer_phone {
        builder.push(" AND j.customer_phone ILIKE ");
        builder.push_bind(format!("%{customer_phone}%"));
    }
    if let Some(technician_id) = filter.technician_id {
        builder.push(" AND j.technician_id = ");
        builder.push_bind(technician_id);
    }
    if let Some(status) = filter.status {
        builder.push(" AND j.status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(from) = filter.scheduled_from {
        builder.push(" AND j.scheduled_date >= ");
        builder.push_bind(from);
    }
    if let Some(to) = filter.scheduled_to {
        builder.push(" AND j.scheduled_date <= ");
        builder.push_bind(to);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        builder.push(" AND (j.customer_name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR j.customer_phone ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR j.customer_email ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR j.service_address ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR t.name ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

/// Filtered, paginated listing, newest-created-first.
pub async fn list_jobs(pool: &Pool<Postgres>, filter: &JobFilter) -> Result<Vec<DbJobListing>> {
    let mut builder = QueryBuilder::new(listing_select());
    push_filters(&mut builder, filter);

    builder.push(" ORDER BY j.created_at DESC LIMIT ");
    builder.push_bind(filter.limit() as i64);
    builder.push(" OFFSET ");
    builder.push_bind(filter.offset() as i64);

    let jobs = builder
        .build_query_as::<DbJobListing>()
        .fetch_all(pool)
        .await?;

    Ok(jobs)
}

pub async fn count_jobs(pool: &Pool<Postgres>, filter: &JobFilter) -> Result<i64> {
    let mut builder = QueryBuilder::new(
        "SELECT COUNT(*) \
         FROM jobs j \
         JOIN time_slots s ON s.id = j.time_slot_id \
         JOIN technicians t ON t.id = j.technician_id \
         WHERE 1=1",
    );
    push_filters(&mut builder, filter);

    let count: i64 = builder.build_query_scalar().fetch_one(pool).await?;
    Ok(count)
}

pub async fn get_job_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbJobListing>> {
    let mut builder = QueryBuilder::new(listing_select());
    builder.push(" AND j.id = ");
    builder.push_bind(id);

    let job = builder
        .build_query_as::<DbJobListing>()
        .fetch_optional(pool)
        .await?;

    Ok(job)
}

/// Status transition; idempotent, so re-completing a COMPLETED job simply
/// rewrites the same value.
pub async fn update_job_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: JobStatus,
) -> Result<Option<DbJob>> {
    let job = sqlx::query_as::<_, DbJob>(&format!(
        r#"
        UPDATE jobs
        SET status = $2, updated_at = $3
        WHERE id = $1
        RETURNING {JOB_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(job)
}

/// Bulk auto-completion. The predicate mirrors
/// `fieldsync_core::models::job::completion_due`: a whole past day is
/// unconditionally elapsed; today needs the slot window to have ended.
pub async fn complete_elapsed_jobs(
    pool: &Pool<Postgres>,
    today: NaiveDate,
    minute_of_day: u16,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE jobs
        SET status = 'COMPLETED', updated_at = NOW()
        WHERE status = 'ASSIGNED'
          AND (
            scheduled_date < $1
            OR (
              scheduled_date = $1
              AND EXISTS (
                SELECT 1 FROM time_slots s
                WHERE s.id = jobs.time_slot_id AND s.end_minute < $2
              )
            )
          )
        "#,
    )
    .bind(today)
    .bind(i32::from(minute_of_day))
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn update_job_fields(
    pool: &Pool<Postgres>,
    id: Uuid,
    customer_name: Option<&str>,
    customer_phone: Option<&str>,
    customer_email: Option<&str>,
    job_description: Option<&str>,
    status: Option<JobStatus>,
) -> Result<Option<DbJob>> {
    let job = sqlx::query_as::<_, DbJob>(&format!(
        r#"
        UPDATE jobs
        SET customer_name = COALESCE($2, customer_name),
            customer_phone = COALESCE($3, customer_phone),
            customer_email = COALESCE($4, customer_email),
            job_description = COALESCE($5, job_description),
            status = COALESCE($6, status),
            updated_at = $7
        WHERE id = $1
        RETURNING {JOB_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(customer_name)
    .bind(customer_phone)
    .bind(customer_email)
    .bind(job_description)
    .bind(status.map(|s| s.as_str()))
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(job)
}

pub async fn delete_job(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Aggregate counts over an optional `created_at` range.
pub async fn job_counts(
    pool: &Pool<Postgres>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<DbJobCounts> {
    let mut builder = QueryBuilder::new(
        "SELECT COUNT(*) AS total_jobs, \
         COUNT(*) FILTER (WHERE status = 'ASSIGNED') AS assigned_jobs, \
         COUNT(*) FILTER (WHERE status = 'COMPLETED') AS completed_jobs \
         FROM jobs WHERE 1=1",
    );
    if let Some(from) = from {
        builder.push(" AND created_at >= ");
        builder.push_bind(from);
    }
    if let Some(to) = to {
        builder.push(" AND created_at <= ");
        builder.push_bind(to);
    }

    let counts = builder
        .build_query_as::<DbJobCounts>()
        .fetch_one(pool)
        .await?;

    Ok(counts)
}

pub async fn count_jobs_created_since(
    pool: &Pool<Postgres>,
    since: DateTime<Utc>,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE created_at >= $1")
        .bind(since)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
