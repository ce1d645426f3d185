//! Technician administration: registering technicians and listing the
//! active roster. Working hours arrive as "HH:MM" strings and are stored
//! as minutes since midnight.

use axum::{extract::State, Json};
use fieldsync_core::errors::DispatchError;
use fieldsync_core::models::technician::{CreateTechnicianRequest, Technician};
use fieldsync_core::models::time_window::to_minutes;
use std::sync::Arc;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

#[axum::debug_handler]
pub async fn create_technician(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTechnicianRequest>,
) -> Result<Json<Technician>, AppError> {
    let bounds = match (&payload.work_start_time, &payload.work_end_time) {
        (Some(start), Some(end)) => (Some(to_minutes(start)?), Some(to_minutes(end)?)),
        (None, None) => (None, None),
        _ => {
            return Err(AppError(DispatchError::Validation(
                "work_start_time and work_end_time must be provided together".to_string(),
            )));
        }
    };

    let technician = fieldsync_db::repositories::technician::create_technician(
        &state.db_pool,
        &payload.name,
        &payload.phone,
        bounds.0,
        bounds.1,
        true,
    )
    .await?;

    Ok(Json(technician.into_model()))
}

#[axum::debug_handler]
pub async fn list_technicians(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Technician>>, AppError> {
    let technicians =
        fieldsync_db::repositories::technician::list_active_technicians(&state.db_pool).await?;

    Ok(Json(
        technicians.into_iter().map(|t| t.into_model()).collect(),
    ))
}
