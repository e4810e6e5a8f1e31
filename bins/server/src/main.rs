//! PCMS API Server
//!
//! Main entry point for the patient clinical records service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pcms_api::{AppState, create_router};
use pcms_core::AttachmentStore;
use pcms_db::PatientBackend;
use pcms_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pcms=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Select the patient store
    let backend = PatientBackend::from_config(config.database.as_ref()).await?;
    info!(patient_store = backend.kind(), "Patient store ready");

    // Attachments live for the lifetime of the process
    let attachments = Arc::new(AttachmentStore::new());

    let state = AppState::new(backend, attachments, config.server.max_upload_bytes);
    let app = create_router(state);

    // Start server
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(max_upload_bytes = config.server.max_upload_bytes, "Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
