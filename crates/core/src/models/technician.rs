use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::time_window::TimeWindow;

/// A field technician jobs are assigned to.
///
/// Working-hour bounds are optional: a technician with no bounds is
/// schedulable into any slot. When both bounds are set, `start < end` is
/// enforced at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub is_active: bool,
    pub work_start_minute: Option<u16>,
    pub work_end_minute: Option<u16>,
    pub created_at: DateTime<Utc>,
}

impl Technician {
    /// The technician's working window, or `None` when hours are
    /// unconstrained (either bound missing).
    pub fn working_window(&self) -> Option<TimeWindow> {
        match (self.work_start_minute, self.work_end_minute) {
            (Some(start), Some(end)) => Some(TimeWindow { start, end }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTechnicianRequest {
    pub name: String,
    pub phone: String,
    /// Start of working hours, "HH:MM"; both bounds or neither.
    pub work_start_time: Option<String>,
    /// End of working hours, "HH:MM"; both bounds or neither.
    pub work_end_time: Option<String>,
}

/// Slim technician record returned by the availability listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicianSummary {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}
