use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{error, info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::services::digest::{DailyDigestJob, DigestScheduler};
use appointment_cell::services::store::DocumentAppointmentStore;
use appointment_cell::AppState;
use notification_cell::{NotificationService, SmtpMailer};
use shared_config::AppConfig;
use shared_database::document::DocumentStoreClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Legoe Physio booking API server");

    // A missing variable is a startup failure, never a per-request one.
    let config = AppConfig::from_env().context("incomplete configuration")?;

    // Construct the long-lived clients once and inject them everywhere.
    let store_client = Arc::new(DocumentStoreClient::new(&config));
    let store = Arc::new(DocumentAppointmentStore::new(store_client));
    let mailer = Arc::new(SmtpMailer::new(&config).context("failed to set up SMTP transport")?);
    let notifier = Arc::new(NotificationService::new(mailer, config.clinic_inbox.clone()));

    let state = AppState {
        store: store.clone(),
        notifier: notifier.clone(),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = DigestScheduler::new(DailyDigestJob::new(store, notifier));
    let digest_handle = tokio::spawn(scheduler.run(shutdown_rx));

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Cancel the pending digest trigger before exiting.
    let _ = shutdown_tx.send(true);
    digest_handle.await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
