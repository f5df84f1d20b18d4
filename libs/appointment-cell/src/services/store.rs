use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_database::document::DocumentStoreClient;
use shared_models::appointment::{Appointment, NewAppointment};

use crate::models::AppointmentError;

const APPOINTMENTS_TABLE: &str = "appointments";

/// Persistence gateway for appointment records. The rest of the system
/// never touches storage except through this trait.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Validate and persist one new booking, stamping `id` and
    /// `created_at` at call time.
    async fn create(&self, new: NewAppointment) -> Result<Appointment, AppointmentError>;

    /// All records with `created_at >= threshold`, ascending by requested
    /// appointment date. Unbounded; the expected daily volume is small.
    async fn find_created_since(
        &self,
        threshold: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentError>;
}

pub struct DocumentAppointmentStore {
    client: Arc<DocumentStoreClient>,
}

impl DocumentAppointmentStore {
    pub fn new(client: Arc<DocumentStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AppointmentStore for DocumentAppointmentStore {
    async fn create(&self, new: NewAppointment) -> Result<Appointment, AppointmentError> {
        validate(&new)?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            date: new.date,
            department: new.department,
            therapist: new.therapist,
            message: new.message,
            created_at: Utc::now(),
        };

        let row = serde_json::to_value(&appointment)
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;

        let stored: Appointment = self
            .client
            .insert(APPOINTMENTS_TABLE, row)
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;

        debug!("Stored appointment {}", stored.id);
        Ok(stored)
    }

    async fn find_created_since(
        &self,
        threshold: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = [
            ("created_at", format!("gte.{}", threshold.to_rfc3339())),
            ("order", "date.asc".to_string()),
        ];

        self.client
            .select(APPOINTMENTS_TABLE, &query)
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))
    }
}

fn validate(new: &NewAppointment) -> Result<(), AppointmentError> {
    let required = [
        ("name", &new.name),
        ("email", &new.email),
        ("phone", &new.phone),
        ("department", &new.department),
        ("therapist", &new.therapist),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppointmentError::Validation(format!(
                "{} must not be empty",
                field
            )));
        }
    }

    Ok(())
}
