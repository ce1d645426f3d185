//! Time slot administration. The standard slots are seeded at bootstrap;
//! these endpoints let a dispatcher add extra windows, list the active
//! set, and remove slots no job references.

use axum::{
    extract::{Path, State},
    Json,
};
use fieldsync_core::models::time_slot::{CreateTimeSlotRequest, TimeSlot};
use fieldsync_core::models::time_window::TimeWindow;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

#[axum::debug_handler]
pub async fn create_time_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let window = TimeWindow::from_strings(&payload.start_time, &payload.end_time)?;

    let slot = fieldsync_db::repositories::time_slot::create_time_slot(
        &state.db_pool,
        window,
        payload.display_order,
    )
    .await?;

    Ok(Json(slot.into_model()))
}

#[axum::debug_handler]
pub async fn list_time_slots(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots =
        fieldsync_db::repositories::time_slot::list_active_time_slots(&state.db_pool).await?;

    Ok(Json(slots.into_iter().map(|s| s.into_model()).collect()))
}

#[axum::debug_handler]
pub async fn delete_time_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    fieldsync_db::repositories::time_slot::delete_time_slot(&state.db_pool, id).await?;
    Ok(Json(json!({ "deleted": id })))
}
