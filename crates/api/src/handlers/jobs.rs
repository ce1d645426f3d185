//! # Job Handlers
//!
//! The HTTP face of the scheduling engine: job creation, filtered
//! listing with lazy auto-completion, single-job reads, forward-only
//! updates, elapsed-only deletion, and aggregate statistics.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use fieldsync_core::errors::DispatchError;
use fieldsync_core::models::job::{
    minute_of_day, CreateJobRequest, CreateJobResponse, Job, JobStats, PagedJobs, Pagination,
    UpdateJobRequest, JobFilter,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::scheduling::{scheduler, sweeper};
use crate::ApiState;

#[axum::debug_handler]
pub async fn create_job(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<Json<CreateJobResponse>, AppError> {
    let response = scheduler::schedule_job(
        &state.db_pool,
        state.resolver.as_ref(),
        state.notifier.as_ref(),
        payload,
    )
    .await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<PagedJobs>, AppError> {
    let now = Utc::now();

    let listings = fieldsync_db::repositories::job::list_jobs(&state.db_pool, &filter).await?;
    let total_count = fieldsync_db::repositories::job::count_jobs(&state.db_pool, &filter).await?;

    // Apply the lazy completion path to every job on the page
    let mut jobs = Vec::with_capacity(listings.len());
    for listing in listings {
        jobs.push(sweeper::lazily_complete(&state.db_pool, listing, now).await?);
    }

    let pagination = Pagination::new(filter.page(), filter.limit(), total_count as u64);
    Ok(Json(PagedJobs { jobs, pagination }))
}

#[axum::debug_handler]
pub async fn get_job(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let listing = fieldsync_db::repositories::job::get_job_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| DispatchError::NotFound(format!("Job {id}")))?;

    let job = sweeper::lazily_complete(&state.db_pool, listing, Utc::now()).await?;
    Ok(Json(job))
}

#[axum::debug_handler]
pub async fn update_job(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobRequest>,
) -> Result<Json<Job>, AppError> {
    let listing = fieldsync_db::repositories::job::get_job_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| DispatchError::NotFound(format!("Job {id}")))?;
    let current_status = listing.job.status()?;

    // Status only moves forward
    if let Some(new_status) = payload.status {
        if new_status.rank() < current_status.rank() {
            return Err(AppError(DispatchError::Validation(format!(
                "Cannot move job from {current_status} back to {new_status}"
            ))));
        }
    }

    let updated = fieldsync_db::repositories::job::update_job_fields(
        &state.db_pool,
        id,
        payload.customer_name.as_deref(),
        payload.customer_phone.as_deref(),
        payload.customer_email.as_deref(),
        payload.job_description.as_deref(),
        payload.status,
    )
    .await?
    .ok_or_else(|| DispatchError::NotFound(format!("Job {id}")))?;

    Ok(Json(updated.into_model()?))
}

#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let listing = fieldsync_db::repositories::job::get_job_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| DispatchError::NotFound(format!("Job {id}")))?;

    // Deletion is only allowed once the job's window has fully elapsed,
    // regardless of status: a live or future booking stays on the books
    let now = Utc::now();
    let today = now.date_naive();
    let scheduled = listing.job.scheduled_date;
    let window_elapsed = scheduled < today
        || (scheduled == today && (listing.slot_end_minute as u16) < minute_of_day(now));
    if !window_elapsed {
        return Err(AppError(DispatchError::Validation(
            "Cannot delete a job whose time slot has not yet elapsed".to_string(),
        )));
    }

    fieldsync_db::repositories::job::delete_job(&state.db_pool, id).await?;
    Ok(Json(json!({ "deleted": id })))
}

/// Optional `created_at` bounds for the stats endpoint, as calendar dates.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn get_stats(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<JobStats>, AppError> {
    let from = query
        .from
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    let to = query
        .to
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|dt| dt.and_utc());

    let counts = fieldsync_db::repositories::job::job_counts(&state.db_pool, from, to).await?;
    let (total_technicians, active_technicians) =
        fieldsync_db::repositories::technician::count_technicians(&state.db_pool).await?;

    // Jobs created since the start of the ISO week (Monday, UTC)
    let today = Utc::now().date_naive();
    let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let week_start = week_start
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);
    let jobs_this_week =
        fieldsync_db::repositories::job::count_jobs_created_since(&state.db_pool, week_start)
            .await?;

    let stats = JobStats::from_counts(
        counts.total_jobs,
        counts.assigned_jobs,
        counts.completed_jobs,
        total_technicians,
        active_technicians,
        jobs_this_week,
    );

    Ok(Json(stats))
}
