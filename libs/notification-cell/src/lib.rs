pub mod models;
pub mod services;

pub use models::*;
pub use services::mailer::{Mailer, MemoryMailer, SmtpMailer};
pub use services::notification::NotificationService;
