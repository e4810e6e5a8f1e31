//! Property-based tests for the patient module.

use std::sync::Arc;

use proptest::prelude::*;

use super::{InMemoryPatientStore, PatientInput, PatientService, StoreRepository};
use crate::attachment::AttachmentStore;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

fn service() -> PatientService<StoreRepository<InMemoryPatientStore>> {
    PatientService::new(Arc::new(StoreRepository::new(
        Arc::new(InMemoryPatientStore::new()),
        Arc::new(AttachmentStore::new()),
    )))
}

fn input_for(name: String, age: u8) -> PatientInput {
    PatientInput {
        name,
        age,
        phone_number: "(888) 555-1212".to_string(),
        email_address: "someone@example.com".to_string(),
        address: "123 Main Street".to_string(),
        medical_history: String::new(),
    }
}

proptest! {
    /// Search returns exactly the patients whose name contains the query.
    #[test]
    fn test_find_matches_substring_filter(
        names in prop::collection::vec("[A-Za-z ]{1,12}", 0..12),
        query in "[A-Za-z]{1,3}",
    ) {
        let rt = runtime();
        let (found, expected) = rt.block_on(async {
            let service = service();
            for name in &names {
                service.create_patient(input_for(name.clone(), 40)).await.unwrap();
            }
            let found: Vec<String> = service
                .find_patients(Some(query.as_str()))
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.name)
                .collect();
            let expected: Vec<String> = names
                .iter()
                .filter(|n| n.contains(query.as_str()))
                .cloned()
                .collect();
            (found, expected)
        });

        prop_assert_eq!(found, expected);
    }

    /// Every created patient gets a distinct identifier and reads back unchanged.
    #[test]
    fn test_created_patients_are_unique_and_stable(
        patients in prop::collection::vec(("[A-Za-z ]{1,12}", 0u8..=150), 1..10),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let service = service();
            let mut seen = std::collections::HashSet::new();

            for (name, age) in patients {
                let created = service.create_patient(input_for(name.clone(), age)).await.unwrap();
                assert!(seen.insert(created.id));
                assert_eq!(created.name, name);
                assert_eq!(created.age, age);
                assert_eq!(service.get_patient(created.id).await.unwrap(), created);
            }

            assert_eq!(service.find_patients(None).await.unwrap().len(), seen.len());
        });
    }
}

mod unit_tests {
    use super::*;
    use bytes::Bytes;

    use crate::patient::{Patient, PatientStore};

    #[tokio::test]
    async fn test_no_stale_attachments_for_reused_identifier() {
        let attachments = Arc::new(AttachmentStore::new());
        let patients = Arc::new(InMemoryPatientStore::new());
        let repo = StoreRepository::new(Arc::clone(&patients), Arc::clone(&attachments));
        let service = PatientService::new(Arc::new(repo));

        let created = service
            .create_patient(input_for("John Doe".to_string(), 65))
            .await
            .unwrap();
        service
            .create_attachment(
                created.id,
                "report.pdf".to_string(),
                "application/pdf".to_string(),
                Bytes::from_static(b"report"),
            )
            .await
            .unwrap();
        service.delete_patient(created.id).await.unwrap();

        // Re-insert a record under the same identifier directly through the store.
        let revived = Patient::from_input(created.id, input_for("John Doe".to_string(), 65));
        patients.add(revived).await.unwrap();

        let fetched = service.get_patient(created.id).await.unwrap();
        assert!(fetched.clinical_attachments.is_empty());
        assert!(service.list_attachments(created.id).await.unwrap().is_empty());
    }
}
