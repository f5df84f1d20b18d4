use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{DateTime, Utc};
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use appointment_cell::models::AppointmentError;
use appointment_cell::services::store::AppointmentStore;
use appointment_cell::{appointment_routes, AppState};
use notification_cell::{MemoryMailer, NotificationService};
use shared_models::appointment::{Appointment, NewAppointment};

mock! {
    pub Store {}

    #[async_trait]
    impl AppointmentStore for Store {
        async fn create(&self, new: NewAppointment) -> Result<Appointment, AppointmentError>;
        async fn find_created_since(
            &self,
            threshold: DateTime<Utc>,
        ) -> Result<Vec<Appointment>, AppointmentError>;
    }
}

const CLINIC_INBOX: &str = "clinic@example.com";

fn stored(new: NewAppointment) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        name: new.name,
        email: new.email,
        phone: new.phone,
        date: new.date,
        department: new.department,
        therapist: new.therapist,
        message: new.message,
        created_at: Utc::now(),
    }
}

fn app(store: MockStore, mailer: Arc<MemoryMailer>) -> axum::Router {
    let notifier = Arc::new(NotificationService::new(mailer, CLINIC_INBOX.to_string()));
    appointment_routes(AppState {
        store: Arc::new(store),
        notifier,
    })
}

fn booking_body() -> Value {
    json!({
        "name": "A",
        "email": "a@x.com",
        "phone": "555",
        "date": "2030-01-01T10:00:00Z",
        "department": "Physio",
        "therapist": "Dr. B"
    })
}

async fn post_appointment(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/appointment")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

#[tokio::test]
async fn valid_booking_returns_success_and_sends_two_emails() {
    let mut store = MockStore::new();
    store
        .expect_create()
        .times(1)
        .returning(|new| Ok(stored(new)));
    let mailer = Arc::new(MemoryMailer::new());

    let (status, body) = post_appointment(app(store, mailer.clone()), booking_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, CLINIC_INBOX);
    assert_eq!(sent[1].to, "a@x.com");
    assert!(sent[1].html_body.contains("Physio"));
    assert!(sent[1].html_body.contains("2030-01-01 10:00"));
    // The message field was omitted; the staff alert still renders the
    // label, followed by empty text.
    assert!(sent[0].html_body.contains("<strong>Message:</strong> </p>"));
}

#[tokio::test]
async fn storage_failure_returns_opaque_error_and_no_emails() {
    let mut store = MockStore::new();
    store
        .expect_create()
        .times(1)
        .returning(|_| Err(AppointmentError::Storage("connection lost".to_string())));
    let mailer = Arc::new(MemoryMailer::new());

    let (status, body) = post_appointment(app(store, mailer.clone()), booking_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to process appointment" }));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn missing_required_field_is_rejected_at_the_boundary() {
    let mut store = MockStore::new();
    store.expect_create().times(0);
    let mailer = Arc::new(MemoryMailer::new());

    let mut body = booking_body();
    body.as_object_mut().unwrap().remove("email");
    let (status, _) = post_appointment(app(store, mailer.clone()), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn unparseable_date_is_rejected_at_the_boundary() {
    let mut store = MockStore::new();
    store.expect_create().times(0);
    let mailer = Arc::new(MemoryMailer::new());

    let mut body = booking_body();
    body["date"] = json!("next tuesday");
    let (status, _) = post_appointment(app(store, mailer.clone()), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn gateway_validation_failure_maps_to_bad_request() {
    let mut store = MockStore::new();
    store
        .expect_create()
        .times(1)
        .returning(|_| Err(AppointmentError::Validation("phone must not be empty".to_string())));
    let mailer = Arc::new(MemoryMailer::new());

    let mut body = booking_body();
    body["phone"] = json!("");
    let (status, body) = post_appointment(app(store, mailer.clone()), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("phone"));
    assert!(mailer.sent().is_empty());
}
