use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DispatchError;

/// Lifecycle state of a job. Transitions only move forward
/// (PENDING -> ASSIGNED -> COMPLETED); the scheduler creates jobs directly
/// in `Assigned` once every validation gate has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Assigned,
    Completed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Assigned => "ASSIGNED",
            JobStatus::Completed => "COMPLETED",
        }
    }

    /// Ordering rank used to refuse backward transitions.
    pub fn rank(&self) -> u8 {
        match self {
            JobStatus::Pending => 0,
            JobStatus::Assigned => 1,
            JobStatus::Completed => 2,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(JobStatus::Pending),
            "ASSIGNED" => Ok(JobStatus::Assigned),
            "COMPLETED" => Ok(JobStatus::Completed),
            other => Err(DispatchError::Validation(format!(
                "unknown job status: {other}"
            ))),
        }
    }
}

/// Geographic coordinates from the geocoding collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A scheduled field-service job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub job_description: String,
    /// Raw service address as entered by the dispatcher.
    pub service_address: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub zip_code: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Calendar date only; the time of day comes from the slot.
    pub scheduled_date: NaiveDate,
    pub time_slot_id: Uuid,
    pub technician_id: Uuid,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub job_description: String,
    pub service_address: String,
    pub zip_code: Option<String>,
    /// "YYYY-MM-DD".
    pub scheduled_date: NaiveDate,
    pub time_slot_id: Option<Uuid>,
    pub technician_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJobRequest {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub job_description: Option<String>,
    /// Forward-only; moving a job backward is a validation error.
    pub status: Option<JobStatus>,
}

/// Outcome of one best-effort notification attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryStatus {
    pub sent: bool,
    pub message: String,
}

impl DeliveryStatus {
    pub fn skipped(reason: &str) -> Self {
        Self {
            sent: false,
            message: reason.to_string(),
        }
    }
}

/// Per-channel notification outcomes attached to a scheduling response.
/// Notification failures never undo the booking; they only show up here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSummary {
    pub email: DeliveryStatus,
    pub sms: DeliveryStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobResponse {
    pub job: Job,
    pub notifications: NotificationSummary,
}

/// Typed listing filter. Each field has one explicit matching mode:
/// contains-insensitive for text, exact for ids/status, inclusive range for
/// the scheduled date, and `search` ORs across customer, address, and
/// technician-name fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub technician_id: Option<Uuid>,
    pub status: Option<JobStatus>,
    pub scheduled_from: Option<NaiveDate>,
    pub scheduled_to: Option<NaiveDate>,
    pub search: Option<String>,
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Page size, capped at `MAX_PAGE_SIZE`.
    pub limit: Option<u32>,
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

impl JobFilter {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u32 {
        (self.page() - 1) * self.limit()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total_count: u64) -> Self {
        let total_pages = (total_count.div_ceil(limit as u64)) as u32;
        Self {
            current_page: page,
            total_pages,
            total_count,
            has_next_page: page < total_pages,
            has_prev_page: page > 1 && total_count > 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedJobs {
    pub jobs: Vec<Job>,
    pub pagination: Pagination,
}

/// Aggregate statistics over the job set, optionally bounded by a
/// `created_at` range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStats {
    pub total_jobs: i64,
    pub assigned_jobs: i64,
    pub completed_jobs: i64,
    /// Derived `assigned - completed`, not a real status; may go negative
    /// under date-ranged filters.
    pub pending_jobs: i64,
    pub total_technicians: i64,
    pub active_technicians: i64,
    pub jobs_this_week: i64,
    /// completed / total, percent, 2 decimals; 0 when there are no jobs.
    pub completion_rate: f64,
    /// completed / (assigned + completed), percent, 2 decimals; 0 when the
    /// denominator is 0.
    pub efficiency: f64,
}

impl JobStats {
    #[allow(clippy::too_many_arguments)]
    pub fn from_counts(
        total_jobs: i64,
        assigned_jobs: i64,
        completed_jobs: i64,
        total_technicians: i64,
        active_technicians: i64,
        jobs_this_week: i64,
    ) -> Self {
        let completion_rate = percentage(completed_jobs, total_jobs);
        let efficiency = percentage(completed_jobs, assigned_jobs + completed_jobs);
        Self {
            total_jobs,
            assigned_jobs,
            completed_jobs,
            pending_jobs: assigned_jobs - completed_jobs,
            total_technicians,
            active_technicians,
            jobs_this_week,
            completion_rate,
            efficiency,
        }
    }
}

fn percentage(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let rate = numerator as f64 / denominator as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Minute of day for an instant, shared by the sweeper and the lazy read
/// path so both agree on "has the slot ended".
pub fn minute_of_day(now: DateTime<Utc>) -> u16 {
    (now.hour() * 60 + now.minute()) as u16
}

/// The one completion-eligibility predicate: an ASSIGNED job is due for
/// auto-completion once its whole scheduled day has passed, or once its
/// slot window has ended today. Consumed by the periodic sweep (as SQL
/// mirroring this logic) and by per-read lazy transitions.
pub fn completion_due(
    status: JobStatus,
    scheduled_date: NaiveDate,
    slot_end_minute: u16,
    now: DateTime<Utc>,
) -> bool {
    if status != JobStatus::Assigned {
        return false;
    }
    let today = now.date_naive();
    scheduled_date < today || (scheduled_date == today && slot_end_minute < minute_of_day(now))
}
