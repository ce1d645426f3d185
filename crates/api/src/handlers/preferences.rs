//! Notification preference handlers: read the singleton record and toggle
//! the email/SMS channels. Toggling a channel to the value it already has
//! is rejected so accidental double-submits are visible to the caller.

use axum::{extract::State, Json};
use fieldsync_core::models::preferences::{
    NotificationPreferences, UpdateEmailPreferenceRequest, UpdateSmsPreferenceRequest,
};
use std::sync::Arc;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

#[axum::debug_handler]
pub async fn get_preferences(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<NotificationPreferences>, AppError> {
    let preferences =
        fieldsync_db::repositories::preferences::get_preferences(&state.db_pool).await?;
    Ok(Json(preferences.into_model()))
}

#[axum::debug_handler]
pub async fn update_email_preference(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateEmailPreferenceRequest>,
) -> Result<Json<NotificationPreferences>, AppError> {
    let preferences = fieldsync_db::repositories::preferences::set_email_preference(
        &state.db_pool,
        payload.send_customer_email,
    )
    .await?;
    Ok(Json(preferences.into_model()))
}

#[axum::debug_handler]
pub async fn update_sms_preference(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<UpdateSmsPreferenceRequest>,
) -> Result<Json<NotificationPreferences>, AppError> {
    let preferences = fieldsync_db::repositories::preferences::set_sms_preference(
        &state.db_pool,
        payload.send_technician_sms,
    )
    .await?;
    Ok(Json(preferences.into_model()))
}
