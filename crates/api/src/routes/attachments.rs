//! Clinical attachment routes.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use pcms_core::ClinicalAttachment;
use pcms_core::attachment::DEFAULT_CONTENT_TYPE;
use pcms_shared::{AppError, PatientId};
use serde::Serialize;
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the attachment routes.
///
/// Only the upload route accepts bodies up to `max_upload_bytes`.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/patients/{patient_id}/attachments",
            post(upload_attachment).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/patients/{patient_id}/attachments",
            get(list_attachments),
        )
        .route(
            "/patients/{patient_id}/attachments/{file_name}",
            get(download_attachment),
        )
        .route(
            "/patients/{patient_id}/attachments/{file_name}",
            delete(delete_attachment),
        )
}

/// Attachment metadata without content.
#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    /// File name as uploaded.
    pub file_name: String,
    /// Stored MIME type.
    pub content_type: String,
    /// Content length in bytes.
    pub size: usize,
}

impl From<ClinicalAttachment> for AttachmentResponse {
    fn from(attachment: ClinicalAttachment) -> Self {
        Self {
            size: attachment.size(),
            file_name: attachment.file_name,
            content_type: attachment.content_type,
        }
    }
}

/// POST `/patients/{patient_id}/attachments`
/// Stores the first file part of a multipart body.
async fn upload_attachment(
    State(state): State<AppState>,
    Path(patient_id): Path<PatientId>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let contents = field.bytes().await?;
        upload = Some((file_name, content_type, contents));
        break;
    }

    let Some((file_name, content_type, contents)) = upload else {
        return Err(AppError::BadRequest("no file was uploaded".to_string()).into());
    };
    if file_name.is_empty() || contents.is_empty() {
        return Err(AppError::BadRequest("uploaded file is empty".to_string()).into());
    }

    let size = contents.len();
    let location = format!(
        "/api/v1/patients/{patient_id}/attachments/{}",
        encode_path_segment(&file_name)
    );
    state
        .service
        .create_attachment(patient_id, file_name.clone(), content_type, contents)
        .await?;

    info!(patient_id = %patient_id, file_name = %file_name, size, "Attachment uploaded");

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// GET `/patients/{patient_id}/attachments`
async fn list_attachments(
    State(state): State<AppState>,
    Path(patient_id): Path<PatientId>,
) -> Result<Json<Vec<AttachmentResponse>>, ApiError> {
    let attachments = state.service.list_attachments(patient_id).await?;
    Ok(Json(
        attachments.into_iter().map(AttachmentResponse::from).collect(),
    ))
}

/// GET `/patients/{patient_id}/attachments/{file_name}`
/// Returns the raw content with its stored content type.
async fn download_attachment(
    State(state): State<AppState>,
    Path((patient_id, file_name)): Path<(PatientId, String)>,
) -> Result<Response, ApiError> {
    let attachment = state.service.get_attachment(patient_id, &file_name).await?;

    let content_type = HeaderValue::from_str(&attachment.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        attachment.file_name.replace(['"', '\\'], "_")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        attachment.contents,
    )
        .into_response())
}

/// DELETE `/patients/{patient_id}/attachments/{file_name}`
async fn delete_attachment(
    State(state): State<AppState>,
    Path((patient_id, file_name)): Path<(PatientId, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_attachment(patient_id, &file_name)
        .await?;

    info!(patient_id = %patient_id, file_name = %file_name, "Attachment deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_path_segment(segment: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push('%');
            encoded.push(char::from(HEX[usize::from(byte >> 4)]));
            encoded.push(char::from(HEX[usize::from(byte & 0x0F)]));
        }
    }
    encoded
}
