//! Time-of-day intervals in minutes since midnight.
//!
//! All scheduling comparisons (working-hours containment, slot expiry) are
//! done on minute counts rather than `"HH:MM"` strings, which sidesteps
//! lexicographic comparison pitfalls and keeps the arithmetic total.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DispatchError, DispatchResult};

/// Minutes in a day; valid minute-of-day values are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Parses a strict `HH:MM` string into minutes since midnight.
///
/// Accepts `00:00` through `23:59`. Anything else (bad shape, out-of-range
/// hour or minute) is an `InvalidTimeFormat` error carrying the input.
pub fn to_minutes(value: &str) -> DispatchResult<u16> {
    let invalid = || DispatchError::InvalidTimeFormat(value.to_string());

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }

    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight back into `HH:MM`.
pub fn to_hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// A half-open time-of-day interval, `start` inclusive and `end` exclusive,
/// both in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: u16,
    pub end: u16,
}

impl TimeWindow {
    /// Builds a window, enforcing `start < end` and in-range bounds.
    pub fn new(start: u16, end: u16) -> DispatchResult<Self> {
        if start >= end {
            return Err(DispatchError::Validation(format!(
                "window end {} must be after start {}",
                to_hhmm(end.min(MINUTES_PER_DAY - 1)),
                to_hhmm(start.min(MINUTES_PER_DAY - 1)),
            )));
        }
        if end >= MINUTES_PER_DAY {
            return Err(DispatchError::Validation(format!(
                "window end {end} is past the end of the day"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses two `HH:MM` strings into a window.
    pub fn from_strings(start: &str, end: &str) -> DispatchResult<Self> {
        Self::new(to_minutes(start)?, to_minutes(end)?)
    }

    /// True iff `inner` lies fully within `self`; boundary equality counts
    /// as contained.
    pub fn contains(&self, inner: TimeWindow) -> bool {
        self.start <= inner.start && inner.end <= self.end
    }

    /// True iff this window has fully elapsed at `now_minutes` (strict: a
    /// window ending exactly now has not yet ended).
    pub fn has_ended(&self, now_minutes: u16) -> bool {
        self.end < now_minutes
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", to_hhmm(self.start), to_hhmm(self.end))
    }
}
