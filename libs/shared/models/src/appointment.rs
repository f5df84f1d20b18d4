use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted booking request. Records are written exactly once and
/// never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// The requested appointment time, exactly as submitted. May be in the
    /// past; no range check is applied.
    pub date: DateTime<Utc>,
    pub department: String,
    pub therapist: String,
    pub message: Option<String>,
    /// Stamped by the persistence gateway at write time, independent of
    /// `date`.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a booking, before the gateway assigns an id
/// and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: DateTime<Utc>,
    pub department: String,
    pub therapist: String,
    pub message: Option<String>,
}
