use std::sync::Arc;

use tracing::info;

use notification_cell::NotificationService;
use shared_models::appointment::Appointment;

use crate::models::{AppointmentError, BookAppointmentRequest};
use crate::services::store::AppointmentStore;

/// One submission's create-and-notify pipeline. Strictly sequential: a
/// failed step aborts everything after it, and a record persisted before a
/// notification failure stays persisted.
pub struct BookingService {
    store: Arc<dyn AppointmentStore>,
    notifier: Arc<NotificationService>,
}

impl BookingService {
    pub fn new(store: Arc<dyn AppointmentStore>, notifier: Arc<NotificationService>) -> Self {
        Self { store, notifier }
    }

    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let appointment = self.store.create(request.into()).await?;
        info!(
            "Booked appointment {} for {} ({})",
            appointment.id, appointment.name, appointment.department
        );

        self.notifier
            .notify_staff(&appointment)
            .await
            .map_err(|e| AppointmentError::Notification(e.to_string()))?;

        self.notifier
            .notify_patient(&appointment)
            .await
            .map_err(|e| AppointmentError::Notification(e.to_string()))?;

        Ok(appointment)
    }
}
