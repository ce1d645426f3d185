//! # Auto-Completion Sweeper
//!
//! Advances job state as time passes: once a job's slot window has
//! elapsed, its ASSIGNED record becomes COMPLETED. Two paths share one
//! eligibility predicate (`fieldsync_core::models::job::completion_due`,
//! mirrored in SQL by `complete_elapsed_jobs`): the periodic bulk sweep
//! here, and the lazy per-read transition applied by the job read
//! handlers. Both are idempotent, so the race between them is harmless.

use std::time::Duration;

use chrono::{DateTime, Utc};
use fieldsync_core::errors::{DispatchError, DispatchResult};
use fieldsync_core::models::job::{completion_due, minute_of_day, Job, JobStatus};
use fieldsync_db::models::DbJobListing;
use fieldsync_db::repositories::job;
use sqlx::PgPool;
use tracing::{error, info};

/// Periodic sweep loop. Errors are logged and the next tick retries; the
/// task itself never exits.
pub async fn run(pool: PgPool, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    info!("Auto-completion sweeper running every {:?}", period);
    loop {
        ticker.tick().await;
        if let Err(err) = sweep(&pool, Utc::now()).await {
            error!("Auto-completion sweep failed: {err:#}");
        }
    }
}

/// One sweep pass: bulk-complete every ASSIGNED job whose scheduled day
/// has passed, or whose slot ended earlier today. Returns the number of
/// jobs transitioned; re-running on an already-swept set is a no-op.
pub async fn sweep(pool: &PgPool, now: DateTime<Utc>) -> eyre::Result<u64> {
    let completed = job::complete_elapsed_jobs(pool, now.date_naive(), minute_of_day(now)).await?;
    if completed > 0 {
        info!("Automatically completed {} jobs", completed);
    }
    Ok(completed)
}

/// Lazy counterpart of the sweep, applied on individual reads: if the
/// queried job is due for completion but the sweeper has not caught it
/// yet, transition it before returning it.
pub async fn lazily_complete(
    pool: &PgPool,
    listing: DbJobListing,
    now: DateTime<Utc>,
) -> DispatchResult<Job> {
    let slot_end_minute = listing.slot_end_minute as u16;
    let mut job = listing.job.into_model()?;

    if completion_due(job.status, job.scheduled_date, slot_end_minute, now) {
        if let Some(updated) = job::update_job_status(pool, job.id, JobStatus::Completed)
            .await
            .map_err(DispatchError::Database)?
        {
            job = updated.into_model()?;
        }
    }

    Ok(job)
}
