//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for patients and their clinical attachments
//! - Request extractors and validation
//! - Error to response mapping

pub mod error;
pub mod extractors;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use pcms_core::{AttachmentStore, PatientService, StoreRepository};
use pcms_db::PatientBackend;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// The service type every handler talks to.
pub type AppService = PatientService<StoreRepository<PatientBackend>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Patient and attachment operations.
    pub service: AppService,
    /// Largest accepted attachment upload body, in bytes.
    pub max_upload_bytes: usize,
    /// Which patient store is serving requests.
    pub patient_store: &'static str,
}

impl AppState {
    /// Wire the service over a patient backend and a shared attachment store.
    #[must_use]
    pub fn new(
        backend: PatientBackend,
        attachments: Arc<AttachmentStore>,
        max_upload_bytes: usize,
    ) -> Self {
        let patient_store = backend.kind();
        let repo = StoreRepository::new(Arc::new(backend), attachments);
        Self {
            service: PatientService::new(Arc::new(repo)),
            max_upload_bytes,
            patient_store,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
