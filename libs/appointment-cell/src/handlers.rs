use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{AppointmentError, BookAppointmentRequest};
use crate::services::booking::BookingService;
use crate::AppState;

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(state.store.clone(), state.notifier.clone());

    booking_service.book(request).await.map_err(|e| match e {
        AppointmentError::Validation(msg) => AppError::Validation(msg),
        AppointmentError::Storage(msg) => AppError::Storage(msg),
        AppointmentError::Notification(msg) => AppError::Email(msg),
    })?;

    Ok(Json(json!({ "success": true })))
}
