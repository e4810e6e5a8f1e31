//! Patient store abstraction and the in-memory implementation.

use std::collections::HashMap;
use std::future::Future;

use pcms_shared::PatientId;
use tokio::sync::RwLock;

use super::error::PatientError;
use super::types::{Patient, search_term};

/// Persistence for patient records keyed by identifier.
///
/// Implemented here for memory and by the db crate for relational databases.
/// Identifiers are assigned before a record reaches the store.
pub trait PatientStore: Send + Sync {
    /// Store a new record and return it as stored.
    fn add(&self, patient: Patient) -> impl Future<Output = Result<Patient, PatientError>> + Send;

    /// Fetch a record by identifier.
    fn get(&self, id: PatientId) -> impl Future<Output = Result<Patient, PatientError>> + Send;

    /// Replace the record stored under `patient.id`.
    ///
    /// Fails with `PatientNotFound` rather than inserting.
    fn update(&self, patient: Patient) -> impl Future<Output = Result<(), PatientError>> + Send;

    /// Delete a record.
    fn remove(&self, id: PatientId) -> impl Future<Output = Result<(), PatientError>> + Send;

    /// All records whose name contains `query` (ordinal, case-sensitive).
    ///
    /// A missing or blank query returns every record, oldest first.
    fn find(
        &self,
        query: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Patient>, PatientError>> + Send;
}

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<PatientId, Patient>,
    order: Vec<PatientId>,
}

/// Patient store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    records: RwLock<Records>,
}

impl InMemoryPatientStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.by_id.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.by_id.is_empty()
    }
}

impl PatientStore for InMemoryPatientStore {
    async fn add(&self, patient: Patient) -> Result<Patient, PatientError> {
        let mut records = self.records.write().await;
        if records.by_id.insert(patient.id, patient.clone()).is_none() {
            records.order.push(patient.id);
        }
        Ok(patient)
    }

    async fn get(&self, id: PatientId) -> Result<Patient, PatientError> {
        self.records
            .read()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| PatientError::patient_not_found(id))
    }

    async fn update(&self, patient: Patient) -> Result<(), PatientError> {
        let mut records = self.records.write().await;
        let stored = records
            .by_id
            .get_mut(&patient.id)
            .ok_or_else(|| PatientError::patient_not_found(patient.id))?;
        *stored = patient;
        Ok(())
    }

    async fn remove(&self, id: PatientId) -> Result<(), PatientError> {
        let mut records = self.records.write().await;
        if records.by_id.remove(&id).is_none() {
            return Err(PatientError::patient_not_found(id));
        }
        records.order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn find(&self, query: Option<&str>) -> Result<Vec<Patient>, PatientError> {
        let term = search_term(query);
        let records = self.records.read().await;

        Ok(records
            .order
            .iter()
            .filter_map(|id| records.by_id.get(id))
            .filter(|patient| term.is_none_or(|t| patient.name_contains(t)))
            .cloned()
            .collect())
    }
}
