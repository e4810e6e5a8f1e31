//! Patient and attachment error types.

use pcms_shared::{AppError, PatientId};
use thiserror::Error;

/// Errors raised by the patient stores, repository and service.
///
/// The not-found variants are the whole business contract; `Storage` only
/// carries infrastructure faults from durable backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatientError {
    /// No patient record exists for the identifier.
    #[error("patient with id '{0}' was not found")]
    PatientNotFound(PatientId),

    /// The patient has no attachment with the given file name.
    #[error("clinical attachment with file name '{0}' was not found")]
    AttachmentNotFound(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl PatientError {
    /// Create a patient not found error.
    #[must_use]
    pub fn patient_not_found(id: PatientId) -> Self {
        Self::PatientNotFound(id)
    }

    /// Create an attachment not found error.
    #[must_use]
    pub fn attachment_not_found(file_name: impl Into<String>) -> Self {
        Self::AttachmentNotFound(file_name.into())
    }

    /// Create a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether this is one of the not-found outcomes.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PatientNotFound(_) | Self::AttachmentNotFound(_))
    }
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::PatientNotFound(_) | PatientError::AttachmentNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            PatientError::Storage(msg) => Self::Database(msg),
        }
    }
}
