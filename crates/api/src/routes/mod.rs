//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod attachments;
pub mod health;
pub mod patients;

/// Creates the API router with all routes.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(patients::routes())
        .merge(attachments::routes(max_upload_bytes))
}
