use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Process-wide notification toggles, stored as a single row and loaded
/// per scheduling request (passed into the scheduler explicitly rather
/// than read from ambient global state).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub send_customer_email: bool,
    pub send_technician_sms: bool,
    pub updated_at: DateTime<Utc>,
}

impl NotificationPreferences {
    /// Both channels are enabled until an administrator toggles them.
    pub fn default_enabled(now: DateTime<Utc>) -> Self {
        Self {
            send_customer_email: true,
            send_technician_sms: true,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmailPreferenceRequest {
    pub send_customer_email: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSmsPreferenceRequest {
    pub send_technician_sms: bool,
}
