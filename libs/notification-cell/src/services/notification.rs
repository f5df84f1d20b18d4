use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use shared_models::appointment::Appointment;

use crate::models::{NotificationError, OutgoingEmail};
use crate::services::mailer::Mailer;
use crate::services::templates;

const STAFF_SUBJECT: &str = "New Appointment Request";
const PATIENT_SUBJECT: &str = "Appointment Request Confirmation";
const DIGEST_SUBJECT: &str = "Daily Appointments Summary";

/// Renders and dispatches the three notification kinds through an injected
/// [`Mailer`].
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    clinic_inbox: String,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>, clinic_inbox: String) -> Self {
        Self {
            mailer,
            clinic_inbox,
        }
    }

    /// Alert the operational inbox about a new booking. From and reply-to
    /// carry the submitter's address so a staff reply reaches the patient
    /// directly.
    pub async fn notify_staff(&self, appointment: &Appointment) -> Result<(), NotificationError> {
        self.mailer
            .send(OutgoingEmail {
                from: appointment.email.clone(),
                reply_to: Some(appointment.email.clone()),
                to: self.clinic_inbox.clone(),
                subject: STAFF_SUBJECT.to_string(),
                html_body: templates::staff_notification(appointment),
            })
            .await?;

        info!("Notified staff about appointment {}", appointment.id);
        Ok(())
    }

    /// Confirm receipt to the submitter.
    pub async fn notify_patient(&self, appointment: &Appointment) -> Result<(), NotificationError> {
        self.mailer
            .send(OutgoingEmail {
                from: self.clinic_inbox.clone(),
                reply_to: None,
                to: appointment.email.clone(),
                subject: PATIENT_SUBJECT.to_string(),
                html_body: templates::patient_confirmation(appointment),
            })
            .await?;

        info!("Sent confirmation to {}", appointment.email);
        Ok(())
    }

    /// Send the daily summary to the operational inbox. An empty day sends
    /// nothing and is not an error.
    pub async fn send_digest(
        &self,
        appointments: &[Appointment],
        as_of: DateTime<Local>,
    ) -> Result<(), NotificationError> {
        if appointments.is_empty() {
            debug!("No appointments to summarize, skipping digest");
            return Ok(());
        }

        self.mailer
            .send(OutgoingEmail {
                from: self.clinic_inbox.clone(),
                reply_to: None,
                to: self.clinic_inbox.clone(),
                subject: DIGEST_SUBJECT.to_string(),
                html_body: templates::daily_digest(appointments, as_of),
            })
            .await?;

        info!("Sent daily digest with {} appointment(s)", appointments.len());
        Ok(())
    }
}
