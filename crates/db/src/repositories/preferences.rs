use crate::models::DbNotificationPreferences;
use chrono::Utc;
use fieldsync_core::errors::{DispatchError, DispatchResult};
use sqlx::{Pool, Postgres};

const SINGLETON_ID: &str = "singleton";

/// Loads the notification preferences row, creating it with both channels
/// enabled on first access.
pub async fn get_preferences(pool: &Pool<Postgres>) -> DispatchResult<DbNotificationPreferences> {
    let existing = sqlx::query_as::<_, DbNotificationPreferences>(
        r#"
        SELECT id, send_customer_email, send_technician_sms, updated_at
        FROM notification_preferences
        WHERE id = $1
        "#,
    )
    .bind(SINGLETON_ID)
    .fetch_optional(pool)
    .await
    .map_err(|err| DispatchError::Database(err.into()))?;

    if let Some(preferences) = existing {
        return Ok(preferences);
    }

    tracing::debug!("Creating default notification preferences");

    // Concurrent first accesses can race; ON CONFLICT keeps this an upsert
    let preferences = sqlx::query_as::<_, DbNotificationPreferences>(
        r#"
        INSERT INTO notification_preferences (id, send_customer_email, send_technician_sms, updated_at)
        VALUES ($1, TRUE, TRUE, $2)
        ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
        RETURNING id, send_customer_email, send_technician_sms, updated_at
        "#,
    )
    .bind(SINGLETON_ID)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|err| DispatchError::Database(err.into()))?;

    Ok(preferences)
}

pub async fn set_email_preference(
    pool: &Pool<Postgres>,
    send_customer_email: bool,
) -> DispatchResult<DbNotificationPreferences> {
    let current = get_preferences(pool).await?;
    if current.send_customer_email == send_customer_email {
        return Err(DispatchError::Validation(format!(
            "Email notifications are already {}",
            if send_customer_email { "enabled" } else { "disabled" }
        )));
    }

    let preferences = sqlx::query_as::<_, DbNotificationPreferences>(
        r#"
        INSERT INTO notification_preferences (id, send_customer_email, send_technician_sms, updated_at)
        VALUES ($1, $2, TRUE, $3)
        ON CONFLICT (id) DO UPDATE
        SET send_customer_email = EXCLUDED.send_customer_email,
            updated_at = EXCLUDED.updated_at
        RETURNING id, send_customer_email, send_technician_sms, updated_at
        "#,
    )
    .bind(SINGLETON_ID)
    .bind(send_customer_email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|err| DispatchError::Database(err.into()))?;

    tracing::info!("Email preference updated to: {}", send_customer_email);
    Ok(preferences)
}

pub async fn set_sms_preference(
    pool: &Pool<Postgres>,
    send_technician_sms: bool,
) -> DispatchResult<DbNotificationPreferences> {
    let current = get_preferences(pool).await?;
    if current.send_technician_sms == send_technician_sms {
        return Err(DispatchError::Validation(format!(
            "SMS notifications are already {}",
            if send_technician_sms { "enabled" } else { "disabled" }
        )));
    }

    let preferences = sqlx::query_as::<_, DbNotificationPreferences>(
        r#"
        INSERT INTO notification_preferences (id, send_customer_email, send_technician_sms, updated_at)
        VALUES ($1, TRUE, $2, $3)
        ON CONFLICT (id) DO UPDATE
        SET send_technician_sms = EXCLUDED.send_technician_sms,
            updated_at = EXCLUDED.updated_at
        RETURNING id, send_customer_email, send_technician_sms, updated_at
        "#,
    )
    .bind(SINGLETON_ID)
    .bind(send_technician_sms)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|err| DispatchError::Database(err.into()))?;

    tracing::info!("SMS preference updated to: {}", send_technician_sms);
    Ok(preferences)
}
