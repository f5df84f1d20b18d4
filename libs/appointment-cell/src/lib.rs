pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use std::sync::Arc;

use notification_cell::NotificationService;

use crate::services::store::AppointmentStore;

pub use models::*;
pub use router::*;

/// Shared handler state. The store and notifier are constructed once at
/// startup and injected, so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AppointmentStore>,
    pub notifier: Arc<NotificationService>,
}
