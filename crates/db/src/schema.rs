use eyre::Result;
use fieldsync_core::models::time_slot::slot_label;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Default slots seeded on first boot, (start, end) in minutes since
/// midnight: 08-10, 10-12, 12-14, 14-16, 16-18.
const DEFAULT_SLOTS: [(i32, i32); 5] = [
    (480, 600),
    (600, 720),
    (720, 840),
    (840, 960),
    (960, 1080),
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create technicians table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS technicians (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            phone VARCHAR(32) NOT NULL UNIQUE,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            work_start_minute INTEGER NULL,
            work_end_minute INTEGER NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_work_hours CHECK (
                work_start_minute IS NULL
                OR work_end_minute IS NULL
                OR work_start_minute < work_end_minute
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            label VARCHAR(64) NOT NULL,
            start_minute INTEGER NOT NULL,
            end_minute INTEGER NOT NULL,
            display_order INTEGER NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_window CHECK (
                start_minute >= 0 AND end_minute < 1440 AND start_minute < end_minute
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create jobs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_name VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(32) NOT NULL,
            customer_email VARCHAR(255) NULL,
            job_description TEXT NOT NULL,
            service_address TEXT NOT NULL,
            street VARCHAR(255) NULL,
            city VARCHAR(128) NULL,
            state VARCHAR(64) NULL,
            state_code VARCHAR(2) NULL,
            zip_code VARCHAR(16) NULL,
            latitude DOUBLE PRECISION NULL,
            longitude DOUBLE PRECISION NULL,
            scheduled_date DATE NOT NULL,
            time_slot_id UUID NOT NULL REFERENCES time_slots(id),
            technician_id UUID NOT NULL REFERENCES technicians(id),
            status VARCHAR(16) NOT NULL DEFAULT 'ASSIGNED',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('PENDING', 'ASSIGNED', 'COMPLETED'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One ASSIGNED job per (technician, date, slot). This index is the
    // serialization point that keeps concurrent scheduling requests from
    // double-booking: the losing insert fails with a unique violation.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS one_assigned_job_per_slot
        ON jobs (technician_id, scheduled_date, time_slot_id)
        WHERE status = 'ASSIGNED';
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS jobs_created_at_idx ON jobs (created_at DESC);
        "#,
    )
    .execute(pool)
    .await?;

    // Create notification_preferences table (single 'singleton' row)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notification_preferences (
            id VARCHAR(16) PRIMARY KEY,
            send_customer_email BOOLEAN NOT NULL DEFAULT TRUE,
            send_technician_sms BOOLEAN NOT NULL DEFAULT TRUE,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    seed_default_time_slots(pool).await?;

    info!("Database schema initialized");
    Ok(())
}

/// Seeds the standard two-hour slots when the table is empty.
async fn seed_default_time_slots(pool: &Pool<Postgres>) -> Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM time_slots")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    for (order, (start, end)) in DEFAULT_SLOTS.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO time_slots (label, start_minute, end_minute, display_order, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            "#,
        )
        .bind(slot_label(*start as u16, *end as u16))
        .bind(start)
        .bind(end)
        .bind((order + 1) as i32)
        .execute(pool)
        .await?;
    }

    info!("Seeded {} default time slots", DEFAULT_SLOTS.len());
    Ok(())
}
