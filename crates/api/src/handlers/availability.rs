//! # Availability Handlers
//!
//! Surfaces the availability checker over HTTP: which technicians can
//! still take a given slot on a given date.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use fieldsync_core::models::technician::TechnicianSummary;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::scheduling::availability;
use crate::ApiState;

/// Query parameters for the available-technicians endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailableTechniciansQuery {
    /// Requested date, "YYYY-MM-DD"; must be today or later.
    pub date: NaiveDate,
    /// The slot to check.
    pub time_slot_id: Uuid,
}

/// Lists active technicians free to take the slot on the date.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/technicians?date=2025-06-12&time_slot_id=<uuid>
/// ```
#[axum::debug_handler]
pub async fn available_technicians(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailableTechniciansQuery>,
) -> Result<Json<Vec<TechnicianSummary>>, AppError> {
    let technicians =
        availability::list_available_technicians(&state.db_pool, query.date, query.time_slot_id)
            .await?;

    Ok(Json(technicians))
}
