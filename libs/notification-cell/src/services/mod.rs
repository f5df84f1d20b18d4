pub mod mailer;
pub mod notification;
pub mod templates;
