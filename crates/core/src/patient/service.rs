//! Patient service implementation.

use std::sync::Arc;

use bytes::Bytes;
use pcms_shared::PatientId;

use super::error::PatientError;
use super::repository::PatientRepository;
use super::types::{Patient, PatientInput};
use crate::attachment::ClinicalAttachment;

/// Entry point for every patient and attachment operation.
///
/// Attachment operations resolve the owning patient first, so a missing
/// patient always surfaces as `PatientNotFound` before any attachment lookup.
pub struct PatientService<R: PatientRepository> {
    repo: Arc<R>,
}

impl<R: PatientRepository> Clone for PatientService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: PatientRepository> PatientService<R> {
    /// Create a new patient service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a patient record.
    pub async fn create_patient(&self, input: PatientInput) -> Result<Patient, PatientError> {
        self.repo.add_patient(input).await
    }

    /// Search patients by name; `None` or a blank query lists everyone.
    pub async fn find_patients(&self, query: Option<&str>) -> Result<Vec<Patient>, PatientError> {
        self.repo.find_patients(query).await
    }

    /// Get a patient by ID.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::PatientNotFound` if no record has the ID.
    pub async fn get_patient(&self, id: PatientId) -> Result<Patient, PatientError> {
        self.repo.get_patient(id).await
    }

    /// Overwrite every mutable field of an existing patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::PatientNotFound` if no record has the ID.
    pub async fn update_patient(
        &self,
        id: PatientId,
        input: PatientInput,
    ) -> Result<(), PatientError> {
        let mut patient = self.repo.get_patient(id).await?;
        patient.apply(input);
        self.repo.update_patient(patient).await
    }

    /// Delete a patient together with its attachments.
    pub async fn delete_patient(&self, id: PatientId) -> Result<(), PatientError> {
        self.repo.remove_patient(id).await
    }

    /// Attach a file to a patient.
    pub async fn create_attachment(
        &self,
        patient_id: PatientId,
        file_name: String,
        content_type: String,
        contents: Bytes,
    ) -> Result<(), PatientError> {
        let patient = self.get_patient(patient_id).await?;
        self.repo
            .add_attachment(&patient, file_name, content_type, contents)
            .await
    }

    /// Fetch a patient's attachment by file name.
    ///
    /// # Errors
    ///
    /// Returns `PatientNotFound` for an unknown patient and
    /// `AttachmentNotFound` when the patient has no file by that name.
    pub async fn get_attachment(
        &self,
        patient_id: PatientId,
        file_name: &str,
    ) -> Result<ClinicalAttachment, PatientError> {
        let patient = self.get_patient(patient_id).await?;
        self.repo.get_attachment(&patient, file_name).await
    }

    /// Delete every attachment of a patient with the given file name.
    pub async fn delete_attachment(
        &self,
        patient_id: PatientId,
        file_name: &str,
    ) -> Result<(), PatientError> {
        let patient = self.get_patient(patient_id).await?;
        self.repo.remove_attachment(&patient, file_name).await
    }

    /// List a patient's attachments.
    pub async fn list_attachments(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<ClinicalAttachment>, PatientError> {
        let patient = self.get_patient(patient_id).await?;
        self.repo.list_attachments(&patient).await
    }
}
