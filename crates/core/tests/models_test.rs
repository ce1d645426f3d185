use chrono::{NaiveDate, TimeZone, Utc};
use fieldsync_core::models::{
    job::{
        completion_due, minute_of_day, Coordinates, Job, JobFilter, JobStats, JobStatus,
        Pagination,
    },
    technician::Technician,
    time_slot::{slot_label, TimeSlot},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_string};
use uuid::Uuid;

fn sample_job() -> Job {
    Job {
        id: Uuid::new_v4(),
        customer_name: "Dana Whitfield".to_string(),
        customer_phone: "+15550100200".to_string(),
        customer_email: Some("dana@example.com".to_string()),
        job_description: "Replace water heater".to_string(),
        service_address: "41 Birch Lane, Springfield, IL 62704".to_string(),
        street: Some("41 Birch Lane".to_string()),
        city: Some("Springfield".to_string()),
        state: Some("Illinois".to_string()),
        state_code: Some("IL".to_string()),
        zip_code: Some("62704".to_string()),
        coordinates: Some(Coordinates {
            lat: 39.7817,
            lng: -89.6501,
        }),
        scheduled_date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
        time_slot_id: Uuid::new_v4(),
        technician_id: Uuid::new_v4(),
        status: JobStatus::Assigned,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_job_serialization_round_trip() {
    let job = sample_job();
    let json = to_string(&job).expect("Failed to serialize job");
    let deserialized: Job = from_str(&json).expect("Failed to deserialize job");

    assert_eq!(deserialized.id, job.id);
    assert_eq!(deserialized.customer_name, job.customer_name);
    assert_eq!(deserialized.scheduled_date, job.scheduled_date);
    assert_eq!(deserialized.status, job.status);
    assert_eq!(deserialized.coordinates, job.coordinates);
}

#[test]
fn test_job_status_wire_format() {
    assert_eq!(serde_json::to_value(JobStatus::Assigned).unwrap(), json!("ASSIGNED"));
    assert_eq!(serde_json::to_value(JobStatus::Completed).unwrap(), json!("COMPLETED"));
    assert_eq!(serde_json::to_value(JobStatus::Pending).unwrap(), json!("PENDING"));

    let parsed: JobStatus = "ASSIGNED".parse().unwrap();
    assert_eq!(parsed, JobStatus::Assigned);
    assert!("assigned".parse::<JobStatus>().is_err());
}

#[test]
fn test_job_status_never_moves_backward() {
    assert!(JobStatus::Completed.rank() > JobStatus::Assigned.rank());
    assert!(JobStatus::Assigned.rank() > JobStatus::Pending.rank());
}

#[test]
fn test_filter_defaults() {
    let filter = JobFilter::default();
    assert_eq!(filter.page(), 1);
    assert_eq!(filter.limit(), 10);
    assert_eq!(filter.offset(), 0);

    let filter = JobFilter {
        page: Some(3),
        limit: Some(25),
        ..Default::default()
    };
    assert_eq!(filter.offset(), 50);

    // Limit is capped and a zero page is normalized
    let filter = JobFilter {
        page: Some(0),
        limit: Some(1000),
        ..Default::default()
    };
    assert_eq!(filter.page(), 1);
    assert_eq!(filter.limit(), 100);
}

#[test]
fn test_pagination_metadata() {
    let pagination = Pagination::new(2, 10, 35);
    assert_eq!(pagination.total_pages, 4);
    assert!(pagination.has_next_page);
    assert!(pagination.has_prev_page);

    let pagination = Pagination::new(1, 10, 0);
    assert_eq!(pagination.total_pages, 0);
    assert!(!pagination.has_next_page);
    assert!(!pagination.has_prev_page);

    let pagination = Pagination::new(4, 10, 35);
    assert!(!pagination.has_next_page);
}

#[test]
fn test_stats_from_counts() {
    // 10 jobs total, 6 still assigned, 4 completed
    let stats = JobStats::from_counts(10, 6, 4, 5, 3, 2);
    assert_eq!(stats.completion_rate, 40.0);
    assert_eq!(stats.efficiency, 40.0);
    assert_eq!(stats.pending_jobs, 2);
    assert_eq!(stats.jobs_this_week, 2);
}

#[test]
fn test_stats_zero_denominators() {
    let stats = JobStats::from_counts(0, 0, 0, 0, 0, 0);
    assert_eq!(stats.completion_rate, 0.0);
    assert_eq!(stats.efficiency, 0.0);
    assert_eq!(stats.pending_jobs, 0);
}

#[test]
fn test_stats_rounding() {
    // 1 of 3 completed -> 33.33, not a long tail of digits
    let stats = JobStats::from_counts(3, 2, 1, 1, 1, 0);
    assert_eq!(stats.completion_rate, 33.33);
}

#[test]
fn test_technician_working_window() {
    let mut technician = Technician {
        id: Uuid::new_v4(),
        name: "Priya Raman".to_string(),
        phone: "+15550100300".to_string(),
        is_active: true,
        work_start_minute: Some(480),
        work_end_minute: Some(1080),
        created_at: Utc::now(),
    };

    let window = technician.working_window().unwrap();
    assert_eq!(window.start, 480);
    assert_eq!(window.end, 1080);

    // A single bound is treated as unconstrained
    technician.work_end_minute = None;
    assert!(technician.working_window().is_none());
}

#[test]
fn test_slot_label_and_window() {
    assert_eq!(slot_label(480, 600), "08:00 - 10:00");

    let slot = TimeSlot {
        id: Uuid::new_v4(),
        label: slot_label(600, 720),
        start_minute: 600,
        end_minute: 720,
        display_order: 2,
        is_active: true,
        created_at: Utc::now(),
    };
    assert_eq!(slot.window().start, 600);
    assert_eq!(slot.window().end, 720);
}

#[rstest]
// Scheduled yesterday: due regardless of slot time
#[case("2025-06-11", 600, "2025-06-12T08:00:00Z", true)]
// Today, slot ended a minute ago
#[case("2025-06-12", 600, "2025-06-12T10:01:00Z", true)]
// Today, slot ends exactly now: not yet due
#[case("2025-06-12", 600, "2025-06-12T10:00:00Z", false)]
// Today, slot still running
#[case("2025-06-12", 600, "2025-06-12T09:30:00Z", false)]
// Scheduled tomorrow
#[case("2025-06-13", 600, "2025-06-12T23:59:00Z", false)]
fn test_completion_due(
    #[case] scheduled: &str,
    #[case] slot_end: u16,
    #[case] now: &str,
    #[case] expected: bool,
) {
    let scheduled: NaiveDate = scheduled.parse().unwrap();
    let now = now.parse().unwrap();
    assert_eq!(
        completion_due(JobStatus::Assigned, scheduled, slot_end, now),
        expected
    );
}

#[test]
fn test_completion_due_only_for_assigned() {
    let scheduled = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 6, 12, 12, 0, 0).unwrap();

    // Long past, but already terminal or not yet assigned
    assert!(!completion_due(JobStatus::Completed, scheduled, 600, now));
    assert!(!completion_due(JobStatus::Pending, scheduled, 600, now));
    assert!(completion_due(JobStatus::Assigned, scheduled, 600, now));
}

#[test]
fn test_minute_of_day() {
    let now = Utc.with_ymd_and_hms(2025, 6, 12, 10, 1, 30).unwrap();
    assert_eq!(minute_of_day(now), 601);
}
