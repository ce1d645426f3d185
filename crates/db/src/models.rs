use chrono::{DateTime, NaiveDate, Utc};
use fieldsync_core::errors::DispatchResult;
use fieldsync_core::models::{
    job::{Coordinates, Job, JobStatus},
    preferences::NotificationPreferences,
    technician::Technician,
    time_slot::TimeSlot,
    time_window::TimeWindow,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTechnician {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub is_active: bool,
    pub work_start_minute: Option<i32>,
    pub work_end_minute: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl DbTechnician {
    pub fn into_model(self) -> Technician {
        Technician {
            id: self.id,
            name: self.name,
            phone: self.phone,
            is_active: self.is_active,
            work_start_minute: self.work_start_minute.map(|m| m as u16),
            work_end_minute: self.work_end_minute.map(|m| m as u16),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub label: String,
    pub start_minute: i32,
    pub end_minute: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl DbTimeSlot {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_minute as u16,
            end: self.end_minute as u16,
        }
    }

    pub fn into_model(self) -> TimeSlot {
        TimeSlot {
            id: self.id,
            label: self.label,
            start_minute: self.start_minute as u16,
            end_minute: self.end_minute as u16,
            display_order: self.display_order,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbJob {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub job_description: String,
    pub service_address: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub scheduled_date: NaiveDate,
    pub time_slot_id: Uuid,
    pub technician_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbJob {
    pub fn status(&self) -> DispatchResult<JobStatus> {
        self.status.parse()
    }

    pub fn into_model(self) -> DispatchResult<Job> {
        let status = self.status()?;
        let coordinates = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };
        Ok(Job {
            id: self.id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            job_description: self.job_description,
            service_address: self.service_address,
            street: self.street,
            city: self.city,
            state: self.state,
            state_code: self.state_code,
            zip_code: self.zip_code,
            coordinates,
            scheduled_date: self.scheduled_date,
            time_slot_id: self.time_slot_id,
            technician_id: self.technician_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A job row joined with the context the read path needs: the slot window
/// for lazy auto-completion and the technician name for free-text search
/// results.
#[derive(Debug, Clone, FromRow)]
pub struct DbJobListing {
    #[sqlx(flatten)]
    pub job: DbJob,
    pub slot_start_minute: i32,
    pub slot_end_minute: i32,
    pub technician_name: String,
}

/// Column values for a new job row. Address fields are whatever the
/// resolver produced; raw address plus null coordinates when it failed.
#[derive(Debug, Clone)]
pub struct JobInsert {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub job_description: String,
    pub service_address: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub scheduled_date: NaiveDate,
    pub time_slot_id: Uuid,
    pub technician_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotificationPreferences {
    pub id: String,
    pub send_customer_email: bool,
    pub send_technician_sms: bool,
    pub updated_at: DateTime<Utc>,
}

impl DbNotificationPreferences {
    pub fn into_model(self) -> NotificationPreferences {
        NotificationPreferences {
            send_customer_email: self.send_customer_email,
            send_technician_sms: self.send_technician_sms,
            updated_at: self.updated_at,
        }
    }
}

/// Aggregate counts backing the stats endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct DbJobCounts {
    pub total_jobs: i64,
    pub assigned_jobs: i64,
    pub completed_jobs: i64,
}
