//! # Job Scheduler
//!
//! Orchestrates job creation: the availability gate is the only hard-fail
//! step. Address resolution happens before the insert but is non-fatal,
//! and notification dispatch happens strictly after the insert commits —
//! a failed email or SMS shows up in the response metadata and never
//! rolls the booking back.

use fieldsync_core::errors::{DispatchError, DispatchResult};
use fieldsync_core::models::job::{
    CreateJobRequest, CreateJobResponse, DeliveryStatus, Job, NotificationSummary,
};
use fieldsync_core::models::preferences::NotificationPreferences;
use fieldsync_core::models::technician::Technician;
use fieldsync_db::models::JobInsert;
use fieldsync_db::repositories::{job, preferences};
use sqlx::PgPool;
use tracing::warn;

use crate::external::{AddressResolver, Notifier};
use crate::scheduling::availability;

pub async fn schedule_job(
    pool: &PgPool,
    resolver: &dyn AddressResolver,
    notifier: &dyn Notifier,
    input: CreateJobRequest,
) -> DispatchResult<CreateJobResponse> {
    let technician_id = input
        .technician_id
        .ok_or_else(|| DispatchError::MissingField("technician_id".to_string()))?;
    let time_slot_id = input
        .time_slot_id
        .ok_or_else(|| DispatchError::MissingField("time_slot_id".to_string()))?;

    // The one hard-fail gate; its error propagates verbatim
    let (technician, _slot) =
        availability::check_availability(pool, technician_id, input.scheduled_date, time_slot_id)
            .await?;

    // Address resolution is best-effort: on geocoder failure the job keeps
    // the raw address and null coordinates
    let parsed = resolver.parse_address(&input.service_address);
    let coordinates = resolver
        .geocode(&input.service_address, input.zip_code.as_deref())
        .await;
    if coordinates.is_none() {
        warn!("Geocoding unavailable, creating job without coordinates");
    }

    let insert = JobInsert {
        customer_name: input.customer_name,
        customer_phone: input.customer_phone,
        customer_email: input.customer_email,
        job_description: input.job_description,
        service_address: input.service_address,
        street: parsed.street,
        city: parsed.city,
        state: parsed.state,
        state_code: parsed.state_code,
        zip_code: input.zip_code.or(parsed.zip_code),
        latitude: coordinates.map(|c| c.lat),
        longitude: coordinates.map(|c| c.lng),
        scheduled_date: input.scheduled_date,
        time_slot_id,
        technician_id,
    };

    // The insert is the serialization point: a concurrent request that
    // passed the gate for the same triple loses here as DoubleBooked
    let job = job::insert_job(pool, &insert).await?.into_model()?;

    // Preferences are loaded per request and passed in explicitly
    let prefs = preferences::get_preferences(pool).await?.into_model();
    let technician = technician.into_model();
    let notifications = dispatch_notifications(notifier, &prefs, &job, &technician).await;

    Ok(CreateJobResponse { job, notifications })
}

/// Post-commit notification fan-out. Each channel is gated by the
/// preferences record and the presence of a recipient; outcomes are
/// reported, never escalated.
pub async fn dispatch_notifications(
    notifier: &dyn Notifier,
    prefs: &NotificationPreferences,
    job: &Job,
    technician: &Technician,
) -> NotificationSummary {
    let email = if !prefs.send_customer_email {
        DeliveryStatus::skipped("Customer email notifications are disabled")
    } else if job.customer_email.is_none() {
        DeliveryStatus::skipped("No customer email on file")
    } else {
        notifier.send_job_confirmation(job, technician).await
    };

    let sms = if !prefs.send_technician_sms {
        DeliveryStatus::skipped("Technician SMS notifications are disabled")
    } else if technician.phone.is_empty() {
        DeliveryStatus::skipped("Technician has no phone number")
    } else {
        notifier.send_sms(&technician.phone, &sms_body(job)).await
    };

    NotificationSummary { email, sms }
}

fn sms_body(job: &Job) -> String {
    format!(
        "New job on {}: {} at {}",
        job.scheduled_date, job.job_description, job.service_address
    )
}
