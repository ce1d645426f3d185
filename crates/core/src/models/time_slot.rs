use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::time_window::{to_hhmm, TimeWindow};

/// A configured time-of-day interval jobs are scheduled into.
///
/// Slots are created by configuration (seeded defaults or an administrative
/// call), never by end users in the scheduling flow. A slot referenced by
/// any job is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub label: String,
    pub start_minute: u16,
    pub end_minute: u16,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TimeSlot {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_minute,
            end: self.end_minute,
        }
    }
}

/// Renders the display label for a slot window, e.g. "08:00 - 10:00".
pub fn slot_label(start_minute: u16, end_minute: u16) -> String {
    format!("{} - {}", to_hhmm(start_minute), to_hhmm(end_minute))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotRequest {
    /// Start of the window, "HH:MM".
    pub start_time: String,
    /// End of the window, "HH:MM".
    pub end_time: String,
    /// Display rank; appended after the current maximum when omitted.
    pub display_order: Option<i32>,
}
