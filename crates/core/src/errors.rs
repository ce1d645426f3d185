use chrono::NaiveDate;
use thiserror::Error;

use crate::models::time_window::TimeWindow;

/// Error taxonomy for the scheduling core.
///
/// Every gate in the availability check returns a distinct variant so call
/// sites (and the HTTP layer) can tell a double-booking apart from a
/// working-hours violation without string matching.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource is inactive: {0}")]
    Inactive(String),

    #[error("Time slot {slot} is outside technician working hours {working}")]
    OutsideWorkingHours { working: TimeWindow, slot: TimeWindow },

    #[error("Technician already has a job assigned for this date and time slot")]
    DoubleBooked,

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTimeFormat(String),

    #[error("Requested date is in the past: {0}")]
    PastDate(NaiveDate),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
