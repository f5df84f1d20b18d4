use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::appointment::NewAppointment;

/// Booking request body for `POST /api/appointment`. Typed so malformed
/// input (missing keys, unparseable date) is rejected at the boundary
/// before any storage or email I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: DateTime<Utc>,
    pub department: String,
    pub therapist: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<BookAppointmentRequest> for NewAppointment {
    fn from(request: BookAppointmentRequest) -> Self {
        NewAppointment {
            name: request.name,
            email: request.email,
            phone: request.phone,
            date: request.date,
            department: request.department,
            therapist: request.therapist,
            message: request.message,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Notification error: {0}")]
    Notification(String),
}
