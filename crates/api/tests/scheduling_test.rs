use async_trait::async_trait;
use chrono::Utc;
use fieldsync_core::errors::DispatchError;
use fieldsync_core::models::job::{DeliveryStatus, Job, JobStatus};
use fieldsync_core::models::preferences::NotificationPreferences;
use fieldsync_core::models::technician::Technician;
use fieldsync_db::models::{DbTechnician, DbTimeSlot};
use mockall::mock;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use fieldsync_api::external::Notifier;
use fieldsync_api::scheduling::availability::{validate_assignment, working_window};
use fieldsync_api::scheduling::scheduler::dispatch_notifications;

fn technician(work_start: Option<i32>, work_end: Option<i32>, active: bool) -> DbTechnician {
    DbTechnician {
        id: Uuid::new_v4(),
        name: "Dana Reyes".to_string(),
        phone: "+15550001111".to_string(),
        is_active: active,
        work_start_minute: work_start,
        work_end_minute: work_end,
        created_at: Utc::now(),
    }
}

fn slot(start: i32, end: i32, active: bool) -> DbTimeSlot {
    DbTimeSlot {
        id: Uuid::new_v4(),
        label: "08:00 - 10:00".to_string(),
        start_minute: start,
        end_minute: end,
        display_order: 1,
        is_active: active,
        created_at: Utc::now(),
    }
}

fn sample_job(customer_email: Option<&str>) -> Job {
    let now = Utc::now();
    Job {
        id: Uuid::new_v4(),
        customer_name: "Pat Doyle".to_string(),
        customer_phone: "+15552223333".to_string(),
        customer_email: customer_email.map(str::to_string),
        job_description: "Water heater replacement".to_string(),
        service_address: "12 Oak St, Springfield, IL 62704".to_string(),
        street: Some("12 Oak St".to_string()),
        city: Some("Springfield".to_string()),
        state: Some("Illinois".to_string()),
        state_code: Some("IL".to_string()),
        zip_code: Some("62704".to_string()),
        coordinates: None,
        scheduled_date: now.date_naive(),
        time_slot_id: Uuid::new_v4(),
        technician_id: Uuid::new_v4(),
        status: JobStatus::Assigned,
        created_at: now,
        updated_at: now,
    }
}

fn sample_technician(phone: &str) -> Technician {
    Technician {
        id: Uuid::new_v4(),
        name: "Dana Reyes".to_string(),
        phone: phone.to_string(),
        is_active: true,
        work_start_minute: None,
        work_end_minute: None,
        created_at: Utc::now(),
    }
}

fn preferences(email: bool, sms: bool) -> NotificationPreferences {
    NotificationPreferences {
        send_customer_email: email,
        send_technician_sms: sms,
        updated_at: Utc::now(),
    }
}

mock! {
    TestNotifier {}

    #[async_trait]
    impl Notifier for TestNotifier {
        async fn send_job_confirmation(&self, job: &Job, technician: &Technician) -> DeliveryStatus;
        async fn send_sms(&self, phone: &str, body: &str) -> DeliveryStatus;
    }
}

#[test]
fn test_assignment_accepted_within_working_hours() {
    // 08:00-18:00 working hours comfortably contain an 08:00-10:00 slot
    let tech = technician(Some(480), Some(1080), true);
    let slot = slot(480, 600, true);

    assert!(validate_assignment(&tech, &slot, false).is_ok());
}

#[test]
fn test_assignment_accepted_at_exact_boundaries() {
    // A slot spanning exactly the working window is still contained
    let tech = technician(Some(480), Some(600), true);
    let slot = slot(480, 600, true);

    assert!(validate_assignment(&tech, &slot, false).is_ok());
}

#[test]
fn test_assignment_accepted_without_hour_bounds() {
    // No configured working hours means any slot is acceptable
    let tech = technician(None, None, true);
    let slot = slot(960, 1080, true);

    assert!(working_window(&tech).is_none());
    assert!(validate_assignment(&tech, &slot, false).is_ok());
}

#[test]
fn test_assignment_rejected_outside_working_hours() {
    // 09:00-17:00 working hours cannot take an 08:00-10:00 slot
    let tech = technician(Some(540), Some(1020), true);
    let slot = slot(480, 600, true);

    let err = validate_assignment(&tech, &slot, false).unwrap_err();
    match err {
        DispatchError::OutsideWorkingHours { working, slot } => {
            assert_eq!(working.to_string(), "09:00-17:00");
            assert_eq!(slot.to_string(), "08:00-10:00");
        }
        other => panic!("expected OutsideWorkingHours, got {other:?}"),
    }
}

#[test]
fn test_assignment_rejected_for_inactive_technician() {
    let tech = technician(Some(480), Some(1080), false);
    let slot = slot(480, 600, true);

    let err = validate_assignment(&tech, &slot, false).unwrap_err();
    assert!(matches!(err, DispatchError::Inactive(ref who) if who.starts_with("Technician")));
}

#[test]
fn test_assignment_rejected_for_inactive_slot() {
    let tech = technician(Some(480), Some(1080), true);
    let slot = slot(480, 600, false);

    let err = validate_assignment(&tech, &slot, false).unwrap_err();
    assert!(matches!(err, DispatchError::Inactive(ref what) if what.starts_with("Time slot")));
}

#[test]
fn test_assignment_rejected_on_conflict() {
    let tech = technician(Some(480), Some(1080), true);
    let slot = slot(480, 600, true);

    let err = validate_assignment(&tech, &slot, true).unwrap_err();
    assert!(matches!(err, DispatchError::DoubleBooked));
}

#[test]
fn test_inactive_technician_reported_before_conflict() {
    // The gates short-circuit in order; the conflict verdict is only
    // reached once technician, slot, and hours have all passed
    let tech = technician(Some(480), Some(1080), false);
    let slot = slot(480, 600, true);

    let err = validate_assignment(&tech, &slot, true).unwrap_err();
    assert!(matches!(err, DispatchError::Inactive(_)));
}

#[tokio::test]
async fn test_notifications_sent_on_both_channels() {
    let job = sample_job(Some("pat@example.com"));
    let tech = sample_technician("+15550001111");
    let prefs = preferences(true, true);

    let mut notifier = MockTestNotifier::new();
    notifier
        .expect_send_job_confirmation()
        .times(1)
        .returning(|_, _| DeliveryStatus {
            sent: true,
            message: "email queued".to_string(),
        });
    notifier
        .expect_send_sms()
        .withf(|phone, _| phone == "+15550001111")
        .times(1)
        .returning(|_, _| DeliveryStatus {
            sent: true,
            message: "sms queued".to_string(),
        });

    let summary = dispatch_notifications(&notifier, &prefs, &job, &tech).await;

    assert!(summary.email.sent);
    assert!(summary.sms.sent);
}

#[tokio::test]
async fn test_email_skipped_when_disabled() {
    let job = sample_job(Some("pat@example.com"));
    let tech = sample_technician("+15550001111");
    let prefs = preferences(false, true);

    let mut notifier = MockTestNotifier::new();
    // The email channel must never be invoked when the preference is off
    notifier.expect_send_job_confirmation().times(0);
    notifier
        .expect_send_sms()
        .times(1)
        .returning(|_, _| DeliveryStatus {
            sent: true,
            message: "sms queued".to_string(),
        });

    let summary = dispatch_notifications(&notifier, &prefs, &job, &tech).await;

    assert!(!summary.email.sent);
    assert_eq!(summary.email.message, "Customer email notifications are disabled");
    assert!(summary.sms.sent);
}

#[tokio::test]
async fn test_email_skipped_without_recipient() {
    let job = sample_job(None);
    let tech = sample_technician("+15550001111");
    let prefs = preferences(true, true);

    let mut notifier = MockTestNotifier::new();
    notifier.expect_send_job_confirmation().times(0);
    notifier
        .expect_send_sms()
        .times(1)
        .returning(|_, _| DeliveryStatus {
            sent: true,
            message: "sms queued".to_string(),
        });

    let summary = dispatch_notifications(&notifier, &prefs, &job, &tech).await;

    assert!(!summary.email.sent);
    assert_eq!(summary.email.message, "No customer email on file");
}

#[tokio::test]
async fn test_sms_skipped_when_disabled() {
    let job = sample_job(Some("pat@example.com"));
    let tech = sample_technician("+15550001111");
    let prefs = preferences(true, false);

    let mut notifier = MockTestNotifier::new();
    notifier
        .expect_send_job_confirmation()
        .times(1)
        .returning(|_, _| DeliveryStatus {
            sent: true,
            message: "email queued".to_string(),
        });
    notifier.expect_send_sms().times(0);

    let summary = dispatch_notifications(&notifier, &prefs, &job, &tech).await;

    assert!(summary.email.sent);
    assert!(!summary.sms.sent);
    assert_eq!(summary.sms.message, "Technician SMS notifications are disabled");
}

#[tokio::test]
async fn test_sms_skipped_without_phone() {
    let job = sample_job(Some("pat@example.com"));
    let tech = sample_technician("");
    let prefs = preferences(true, true);

    let mut notifier = MockTestNotifier::new();
    notifier
        .expect_send_job_confirmation()
        .times(1)
        .returning(|_, _| DeliveryStatus {
            sent: true,
            message: "email queued".to_string(),
        });
    notifier.expect_send_sms().times(0);

    let summary = dispatch_notifications(&notifier, &prefs, &job, &tech).await;

    assert!(!summary.sms.sent);
    assert_eq!(summary.sms.message, "Technician has no phone number");
}

#[tokio::test]
async fn test_failed_delivery_reported_not_escalated() {
    let job = sample_job(Some("pat@example.com"));
    let tech = sample_technician("+15550001111");
    let prefs = preferences(true, true);

    let mut notifier = MockTestNotifier::new();
    notifier
        .expect_send_job_confirmation()
        .times(1)
        .returning(|_, _| DeliveryStatus {
            sent: false,
            message: "SMTP connection refused".to_string(),
        });
    notifier
        .expect_send_sms()
        .times(1)
        .returning(|_, _| DeliveryStatus {
            sent: true,
            message: "sms queued".to_string(),
        });

    // A failed channel shows up in the summary; the call itself succeeds
    let summary = dispatch_notifications(&notifier, &prefs, &job, &tech).await;

    assert!(!summary.email.sent);
    assert_eq!(summary.email.message, "SMTP connection refused");
    assert!(summary.sms.sent);
}
