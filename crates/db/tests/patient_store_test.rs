//! Integration tests for the relational patient store.
//!
//! Run against an in-memory SQLite database so no server is needed.

use std::sync::Arc;

use bytes::Bytes;
use pcms_core::attachment::AttachmentStore;
use pcms_core::patient::{
    Patient, PatientError, PatientInput, PatientService, PatientStore, StoreRepository,
};
use pcms_db::{PatientBackend, SeaOrmPatientStore, connect, migration::Migrator};
use pcms_shared::PatientId;
use pcms_shared::config::DatabaseConfig;
use sea_orm_migration::MigratorTrait;

async fn store() -> SeaOrmPatientStore {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        run_migrations: true,
    };
    let db = connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    SeaOrmPatientStore::new(db)
}

fn input(name: &str) -> PatientInput {
    PatientInput {
        name: name.to_string(),
        age: 65,
        phone_number: "(888) 555-1212".to_string(),
        email_address: "john.doe@example.com".to_string(),
        address: "123 Main Street".to_string(),
        medical_history: "No pre-existing conditions.".to_string(),
    }
}

fn patient(name: &str) -> Patient {
    Patient::from_input(PatientId::new(), input(name))
}

#[tokio::test]
async fn test_add_and_get() {
    let store = store().await;

    let added = store.add(patient("John Doe")).await.unwrap();
    let fetched = store.get(added.id).await.unwrap();

    assert_eq!(fetched, added);
}

#[tokio::test]
async fn test_add_drops_attachment_names() {
    let store = store().await;
    let mut record = patient("John Doe");
    record.clinical_attachments = vec!["report.pdf".to_string()];

    let added = store.add(record).await.unwrap();

    assert!(added.clinical_attachments.is_empty());
    assert!(store.get(added.id).await.unwrap().clinical_attachments.is_empty());
}

#[tokio::test]
async fn test_get_not_found() {
    let store = store().await;
    let id = PatientId::new();

    assert_eq!(store.get(id).await, Err(PatientError::PatientNotFound(id)));
}

#[tokio::test]
async fn test_update() {
    let store = store().await;
    let mut added = store.add(patient("John Doe")).await.unwrap();

    added.name = "Joe Schmoe".to_string();
    added.age = 150;
    added.medical_history = String::new();
    store.update(added.clone()).await.unwrap();

    assert_eq!(store.get(added.id).await.unwrap(), added);
}

#[tokio::test]
async fn test_update_not_found_does_not_insert() {
    let store = store().await;
    let ghost = patient("Nobody");

    assert_eq!(
        store.update(ghost.clone()).await,
        Err(PatientError::PatientNotFound(ghost.id))
    );
    assert!(store.find(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove() {
    let store = store().await;
    let added = store.add(patient("John Doe")).await.unwrap();

    store.remove(added.id).await.unwrap();

    assert!(store.get(added.id).await.is_err());
    assert_eq!(
        store.remove(added.id).await,
        Err(PatientError::PatientNotFound(added.id))
    );
}

#[tokio::test]
async fn test_find() {
    let store = store().await;
    for name in ["John Doe", "Jane Doe", "John Smith"] {
        store.add(patient(name)).await.unwrap();
    }

    assert_eq!(store.find(None).await.unwrap().len(), 3);
    assert_eq!(store.find(Some(" ")).await.unwrap().len(), 3);
    assert_eq!(store.find(Some("Doe")).await.unwrap().len(), 2);
    assert!(store.find(Some("Schmoe")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_is_case_sensitive_and_literal() {
    let store = store().await;
    store.add(patient("John Doe")).await.unwrap();
    store.add(patient("Ann_Marie 100%")).await.unwrap();

    // SQLite's LIKE ignores ASCII case; `_` and `%` in the query are literal.
    assert!(store.find(Some("doe")).await.unwrap().is_empty());
    assert!(store.find(Some("n_D")).await.unwrap().is_empty());

    let found = store.find(Some("n_M")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ann_Marie 100%");
    assert_eq!(store.find(Some("0%")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_matches_backslash_literally() {
    let store = store().await;
    store.add(patient("Ann\\Marie")).await.unwrap();
    store.add(patient("AnnMarie")).await.unwrap();
    store.add(patient("Conor O\\")).await.unwrap();

    let found = store.find(Some("n\\M")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ann\\Marie");

    let found = store.find(Some("O\\")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Conor O\\");
}

#[tokio::test]
async fn test_service_over_database_backend() {
    let backend = PatientBackend::Database(store().await);
    let attachments = Arc::new(AttachmentStore::new());
    let repo = StoreRepository::new(Arc::new(backend), Arc::clone(&attachments));
    let service = PatientService::new(Arc::new(repo));

    let created = service.create_patient(input("John Doe")).await.unwrap();
    service
        .create_attachment(
            created.id,
            "report.pdf".to_string(),
            "application/pdf".to_string(),
            Bytes::from_static(b"%PDF"),
        )
        .await
        .unwrap();

    let fetched = service.get_patient(created.id).await.unwrap();
    assert_eq!(fetched.clinical_attachments, ["report.pdf"]);

    service.delete_patient(created.id).await.unwrap();

    assert!(attachments.is_empty());
    assert!(matches!(
        service.get_attachment(created.id, "report.pdf").await,
        Err(PatientError::PatientNotFound(_))
    ));
}
