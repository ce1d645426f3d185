use chrono::NaiveDate;
use fieldsync_core::errors::{DispatchError, DispatchResult};
use fieldsync_core::models::time_window::TimeWindow;
use pretty_assertions::assert_eq;

#[test]
fn test_dispatch_error_display() {
    let missing = DispatchError::MissingField("technician_id".to_string());
    let not_found = DispatchError::NotFound("Technician abc".to_string());
    let inactive = DispatchError::Inactive("Time slot xyz".to_string());
    let double_booked = DispatchError::DoubleBooked;
    let bad_time = DispatchError::InvalidTimeFormat("25:00".to_string());
    let past = DispatchError::PastDate(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

    assert_eq!(
        missing.to_string(),
        "Missing required field: technician_id"
    );
    assert_eq!(not_found.to_string(), "Resource not found: Technician abc");
    assert_eq!(inactive.to_string(), "Resource is inactive: Time slot xyz");
    assert_eq!(
        double_booked.to_string(),
        "Technician already has a job assigned for this date and time slot"
    );
    assert_eq!(
        bad_time.to_string(),
        "Invalid time format: 25:00 (expected HH:MM)"
    );
    assert_eq!(past.to_string(), "Requested date is in the past: 2024-01-05");
}

#[test]
fn test_outside_working_hours_carries_both_windows() {
    let err = DispatchError::OutsideWorkingHours {
        working: TimeWindow { start: 540, end: 1020 },
        slot: TimeWindow { start: 480, end: 600 },
    };

    // Both windows must show up so the caller can act on the message
    let message = err.to_string();
    assert!(message.contains("08:00-10:00"));
    assert!(message.contains("09:00-17:00"));
}

#[test]
fn test_database_error_conversion() {
    fn fails() -> DispatchResult<()> {
        Err(eyre::eyre!("connection refused"))?
    }

    let err = fails().unwrap_err();
    assert!(matches!(err, DispatchError::Database(_)));
    assert!(err.to_string().contains("connection refused"));
}
