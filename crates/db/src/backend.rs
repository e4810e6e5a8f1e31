//! Patient store selection.

use pcms_core::patient::{InMemoryPatientStore, Patient, PatientError, PatientStore};
use pcms_shared::PatientId;
use pcms_shared::config::DatabaseConfig;
use sea_orm::DbErr;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::connect;
use crate::migration::Migrator;
use crate::repositories::SeaOrmPatientStore;

/// The patient store chosen at startup.
#[derive(Debug)]
pub enum PatientBackend {
    /// Records live in process memory and vanish on restart.
    InMemory(InMemoryPatientStore),
    /// Records live in a relational database.
    Database(SeaOrmPatientStore),
}

impl PatientBackend {
    /// Build the backend described by configuration.
    ///
    /// Without a database section the in-memory store is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or migrated.
    pub async fn from_config(config: Option<&DatabaseConfig>) -> Result<Self, DbErr> {
        let Some(config) = config else {
            info!("No database configured, keeping patient records in memory");
            return Ok(Self::InMemory(InMemoryPatientStore::new()));
        };

        let db = connect(config).await?;
        info!("Connected to database");

        if config.run_migrations {
            Migrator::up(&db, None).await?;
            info!("Database migrations applied");
        }

        Ok(Self::Database(SeaOrmPatientStore::new(db)))
    }

    /// Short name of the backend for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "in_memory",
            Self::Database(_) => "database",
        }
    }
}

impl PatientStore for PatientBackend {
    async fn add(&self, patient: Patient) -> Result<Patient, PatientError> {
        match self {
            Self::InMemory(store) => store.add(patient).await,
            Self::Database(store) => store.add(patient).await,
        }
    }

    async fn get(&self, id: PatientId) -> Result<Patient, PatientError> {
        match self {
            Self::InMemory(store) => store.get(id).await,
            Self::Database(store) => store.get(id).await,
        }
    }

    async fn update(&self, patient: Patient) -> Result<(), PatientError> {
        match self {
            Self::InMemory(store) => store.update(patient).await,
            Self::Database(store) => store.update(patient).await,
        }
    }

    async fn remove(&self, id: PatientId) -> Result<(), PatientError> {
        match self {
            Self::InMemory(store) => store.remove(id).await,
            Self::Database(store) => store.remove(id).await,
        }
    }

    async fn find(&self, query: Option<&str>) -> Result<Vec<Patient>, PatientError> {
        match self {
            Self::InMemory(store) => store.find(query).await,
            Self::Database(store) => store.find(query).await,
        }
    }
}
