//! Per-patient attachment store.

use dashmap::DashMap;
use pcms_shared::PatientId;

use super::types::ClinicalAttachment;
use crate::patient::PatientError;

/// Ordered collections of attachments keyed by patient.
///
/// One instance is created at startup and shared by every request. The entry
/// API gives atomic get-or-create of a patient's collection and exclusive
/// access to it while it is appended to or pruned.
///
/// File names are not deduplicated: [`get`](Self::get) returns the first
/// match and [`remove`](Self::remove) drops every match.
#[derive(Debug, Default)]
pub struct AttachmentStore {
    collections: DashMap<PatientId, Vec<ClinicalAttachment>>,
}

impl AttachmentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attachment to the patient's collection.
    pub fn add(&self, patient_id: PatientId, attachment: ClinicalAttachment) {
        self.collections
            .entry(patient_id)
            .or_default()
            .push(attachment);
    }

    /// First attachment with the given file name, in insertion order.
    pub fn get(
        &self,
        patient_id: PatientId,
        file_name: &str,
    ) -> Result<ClinicalAttachment, PatientError> {
        self.collections
            .get(&patient_id)
            .and_then(|collection| {
                collection
                    .iter()
                    .find(|attachment| attachment.file_name == file_name)
                    .cloned()
            })
            .ok_or_else(|| PatientError::attachment_not_found(file_name))
    }

    /// Every attachment of the patient, oldest first.
    pub fn get_all(&self, patient_id: PatientId) -> Vec<ClinicalAttachment> {
        self.collections
            .get(&patient_id)
            .map(|collection| collection.value().clone())
            .unwrap_or_default()
    }

    /// File names of the patient's attachments, oldest first.
    pub fn file_names(&self, patient_id: PatientId) -> Vec<String> {
        self.collections
            .get(&patient_id)
            .map(|collection| {
                collection
                    .iter()
                    .map(|attachment| attachment.file_name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove every attachment with the given file name.
    pub fn remove(&self, patient_id: PatientId, file_name: &str) -> Result<(), PatientError> {
        let removed = match self.collections.get_mut(&patient_id) {
            Some(mut collection) => {
                let before = collection.len();
                collection.retain(|attachment| attachment.file_name != file_name);
                before - collection.len()
            }
            None => 0,
        };

        if removed == 0 {
            return Err(PatientError::attachment_not_found(file_name));
        }

        self.collections
            .remove_if(&patient_id, |_, collection| collection.is_empty());
        Ok(())
    }

    /// Drop the patient's whole collection. Absent collections are ignored.
    pub fn remove_all(&self, patient_id: PatientId) {
        self.collections.remove(&patient_id);
    }

    /// Number of patients with at least one attachment.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether no patient has attachments.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn pdf(name: &str, body: &'static [u8]) -> ClinicalAttachment {
        ClinicalAttachment::new(name, "application/pdf", body)
    }

    #[test]
    fn test_add_then_get() {
        let store = AttachmentStore::new();
        let patient = PatientId::new();

        store.add(patient, pdf("report.pdf", b"contents"));

        let attachment = store.get(patient, "report.pdf").unwrap();
        assert_eq!(attachment.content_type, "application/pdf");
        assert_eq!(attachment.contents.as_ref(), b"contents");
    }

    #[test]
    fn test_get_without_collection() {
        let store = AttachmentStore::new();
        assert_eq!(
            store.get(PatientId::new(), "report.pdf"),
            Err(PatientError::AttachmentNotFound("report.pdf".to_string()))
        );
    }

    #[test]
    fn test_get_unknown_name() {
        let store = AttachmentStore::new();
        let patient = PatientId::new();
        store.add(patient, pdf("report.pdf", b"contents"));

        assert!(matches!(
            store.get(patient, "scan.png"),
            Err(PatientError::AttachmentNotFound(name)) if name == "scan.png"
        ));
    }

    #[test]
    fn test_collections_are_per_patient() {
        let store = AttachmentStore::new();
        let first = PatientId::new();
        let second = PatientId::new();
        store.add(first, pdf("report.pdf", b"first"));

        assert!(store.get(second, "report.pdf").is_err());
        assert!(store.get_all(second).is_empty());
        assert_eq!(store.file_names(first), ["report.pdf"]);
    }

    #[test]
    fn test_duplicate_names_get_first_remove_all() {
        let store = AttachmentStore::new();
        let patient = PatientId::new();
        store.add(patient, pdf("report.pdf", b"first"));
        store.add(patient, pdf("notes.txt", b"notes"));
        store.add(patient, pdf("report.pdf", b"second"));

        assert_eq!(
            store.get(patient, "report.pdf").unwrap().contents.as_ref(),
            b"first"
        );
        assert_eq!(
            store.file_names(patient),
            ["report.pdf", "notes.txt", "report.pdf"]
        );

        store.remove(patient, "report.pdf").unwrap();

        assert_eq!(store.file_names(patient), ["notes.txt"]);
        assert!(store.get(patient, "report.pdf").is_err());
    }

    #[test]
    fn test_remove_unknown_name() {
        let store = AttachmentStore::new();
        let patient = PatientId::new();

        assert!(store.remove(patient, "report.pdf").is_err());

        store.add(patient, pdf("notes.txt", b"notes"));
        assert_eq!(
            store.remove(patient, "report.pdf"),
            Err(PatientError::AttachmentNotFound("report.pdf".to_string()))
        );
        assert_eq!(store.get_all(patient).len(), 1);
    }

    #[test]
    fn test_removing_last_attachment_drops_collection() {
        let store = AttachmentStore::new();
        let patient = PatientId::new();
        store.add(patient, pdf("report.pdf", b"contents"));
        assert_eq!(store.len(), 1);

        store.remove(patient, "report.pdf").unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_all() {
        let store = AttachmentStore::new();
        let patient = PatientId::new();
        store.add(patient, pdf("a.pdf", b"a"));
        store.add(patient, pdf("b.pdf", b"b"));

        store.remove_all(patient);
        store.remove_all(patient);

        assert!(store.get_all(patient).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_appends_all_land() {
        let store = Arc::new(AttachmentStore::new());
        let patient = PatientId::new();

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.add(
                            patient,
                            ClinicalAttachment::new(
                                format!("{worker}-{i}.txt"),
                                "text/plain",
                                Vec::new(),
                            ),
                        );
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_all(patient).len(), 400);
    }
}
