//! Patient repository: one facade over the patient and attachment stores.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use pcms_shared::PatientId;

use super::error::PatientError;
use super::store::PatientStore;
use super::types::{Patient, PatientInput};
use crate::attachment::{AttachmentStore, ClinicalAttachment};

/// Repository trait for patient and attachment persistence.
///
/// Every patient returned carries the file names of its attachments.
/// Attachment methods take an already-resolved patient and only ever fail
/// with `AttachmentNotFound`.
pub trait PatientRepository: Send + Sync {
    /// Create a record under a freshly generated identifier.
    fn add_patient(
        &self,
        input: PatientInput,
    ) -> impl Future<Output = Result<Patient, PatientError>> + Send;

    /// Delete a record and, after it, all of its attachments.
    fn remove_patient(
        &self,
        id: PatientId,
    ) -> impl Future<Output = Result<(), PatientError>> + Send;

    /// Search records by name.
    fn find_patients(
        &self,
        query: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Patient>, PatientError>> + Send;

    /// Fetch one record.
    fn get_patient(
        &self,
        id: PatientId,
    ) -> impl Future<Output = Result<Patient, PatientError>> + Send;

    /// Persist changes to an existing record.
    fn update_patient(
        &self,
        patient: Patient,
    ) -> impl Future<Output = Result<(), PatientError>> + Send;

    /// Attach a file to the patient.
    fn add_attachment(
        &self,
        patient: &Patient,
        file_name: String,
        content_type: String,
        contents: Bytes,
    ) -> impl Future<Output = Result<(), PatientError>> + Send;

    /// Fetch the first attachment with the given file name.
    fn get_attachment(
        &self,
        patient: &Patient,
        file_name: &str,
    ) -> impl Future<Output = Result<ClinicalAttachment, PatientError>> + Send;

    /// Remove every attachment with the given file name.
    fn remove_attachment(
        &self,
        patient: &Patient,
        file_name: &str,
    ) -> impl Future<Output = Result<(), PatientError>> + Send;

    /// All attachments of the patient.
    fn list_attachments(
        &self,
        patient: &Patient,
    ) -> impl Future<Output = Result<Vec<ClinicalAttachment>, PatientError>> + Send;
}

/// Repository composed from a [`PatientStore`] and a shared [`AttachmentStore`].
pub struct StoreRepository<S: PatientStore> {
    patients: Arc<S>,
    attachments: Arc<AttachmentStore>,
}

impl<S: PatientStore> StoreRepository<S> {
    /// Create a repository over the given stores.
    #[must_use]
    pub fn new(patients: Arc<S>, attachments: Arc<AttachmentStore>) -> Self {
        Self {
            patients,
            attachments,
        }
    }

    /// The underlying patient store.
    #[must_use]
    pub fn patient_store(&self) -> &Arc<S> {
        &self.patients
    }

    /// The underlying attachment store.
    #[must_use]
    pub fn attachment_store(&self) -> &Arc<AttachmentStore> {
        &self.attachments
    }

    fn with_attachment_names(&self, mut patient: Patient) -> Patient {
        patient.clinical_attachments = self.attachments.file_names(patient.id);
        patient
    }
}

impl<S: PatientStore> Clone for StoreRepository<S> {
    fn clone(&self) -> Self {
        Self {
            patients: Arc::clone(&self.patients),
            attachments: Arc::clone(&self.attachments),
        }
    }
}

impl<S: PatientStore> PatientRepository for StoreRepository<S> {
    async fn add_patient(&self, input: PatientInput) -> Result<Patient, PatientError> {
        let patient = Patient::from_input(PatientId::new(), input);
        let stored = self.patients.add(patient).await?;
        Ok(self.with_attachment_names(stored))
    }

    async fn remove_patient(&self, id: PatientId) -> Result<(), PatientError> {
        self.patients.remove(id).await?;
        self.attachments.remove_all(id);
        Ok(())
    }

    async fn find_patients(&self, query: Option<&str>) -> Result<Vec<Patient>, PatientError> {
        let patients = self.patients.find(query).await?;
        Ok(patients
            .into_iter()
            .map(|patient| self.with_attachment_names(patient))
            .collect())
    }

    async fn get_patient(&self, id: PatientId) -> Result<Patient, PatientError> {
        let patient = self.patients.get(id).await?;
        Ok(self.with_attachment_names(patient))
    }

    async fn update_patient(&self, patient: Patient) -> Result<(), PatientError> {
        self.patients.update(patient.into_record()).await
    }

    async fn add_attachment(
        &self,
        patient: &Patient,
        file_name: String,
        content_type: String,
        contents: Bytes,
    ) -> Result<(), PatientError> {
        self.attachments.add(
            patient.id,
            ClinicalAttachment {
                file_name,
                content_type,
                contents,
            },
        );
        Ok(())
    }

    async fn get_attachment(
        &self,
        patient: &Patient,
        file_name: &str,
    ) -> Result<ClinicalAttachment, PatientError> {
        self.attachments.get(patient.id, file_name)
    }

    async fn remove_attachment(&self, patient: &Patient, file_name: &str) -> Result<(), PatientError> {
        self.attachments.remove(patient.id, file_name)
    }

    async fn list_attachments(
        &self,
        patient: &Patient,
    ) -> Result<Vec<ClinicalAttachment>, PatientError> {
        Ok(self.attachments.get_all(patient.id))
    }
}
