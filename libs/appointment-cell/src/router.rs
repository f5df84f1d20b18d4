use axum::{routing::post, Router};

use crate::handlers;
use crate::AppState;

pub fn appointment_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/appointment", post(handlers::book_appointment))
        .with_state(state)
}
