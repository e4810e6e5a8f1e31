//! Patient record routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use garde::Validate;
use pcms_core::{Patient, PatientInput};
use pcms_shared::{AppError, PatientId};
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError, extractors::ApiJson};

/// Creates the patient routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/patients", post(create_patient))
        .route("/patients", get(find_patients))
        .route("/patients/{patient_id}", get(get_patient))
        .route("/patients/{patient_id}", put(update_patient))
        .route("/patients/{patient_id}", delete(delete_patient))
}

// ============================================================================
// Request Types
// ============================================================================

/// Body for creating or replacing a patient record.
#[derive(Debug, Deserialize, Validate)]
pub struct PatientRequest {
    /// Full name.
    #[garde(length(min = 1))]
    pub name: String,
    /// Age in years.
    #[garde(range(max = 150))]
    pub age: u8,
    /// Contact phone number.
    #[garde(length(min = 1))]
    pub phone_number: String,
    /// Contact email address.
    #[garde(email)]
    pub email_address: String,
    /// Postal address.
    #[garde(length(min = 1))]
    pub address: String,
    /// Free-text medical history.
    #[serde(default)]
    #[garde(skip)]
    pub medical_history: String,
}

impl PatientRequest {
    fn into_input(self) -> Result<PatientInput, ApiError> {
        self.validate()
            .map_err(|report| AppError::Validation(report.to_string()))?;

        Ok(PatientInput {
            name: self.name,
            age: self.age,
            phone_number: self.phone_number,
            email_address: self.email_address,
            address: self.address,
            medical_history: self.medical_history,
        })
    }
}

/// Query string for patient search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Substring of the patient name; blank lists everyone.
    pub query: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/patients`
async fn create_patient(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PatientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_input()?;
    let patient = state.service.create_patient(input).await?;

    info!(patient_id = %patient.id, "Patient created");

    let location = format!("/api/v1/patients/{}", patient.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(patient),
    ))
}

/// GET `/patients?query=`
async fn find_patients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = state.service.find_patients(params.query.as_deref()).await?;
    Ok(Json(patients))
}

/// GET `/patients/{patient_id}`
async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<PatientId>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.service.get_patient(patient_id).await?;
    Ok(Json(patient))
}

/// PUT `/patients/{patient_id}`
async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<PatientId>,
    ApiJson(payload): ApiJson<PatientRequest>,
) -> Result<StatusCode, ApiError> {
    let input = payload.into_input()?;
    state.service.update_patient(patient_id, input).await?;

    info!(patient_id = %patient_id, "Patient updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/patients/{patient_id}`
async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<PatientId>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_patient(patient_id).await?;

    info!(patient_id = %patient_id, "Patient deleted");
    Ok(StatusCode::NO_CONTENT)
}
