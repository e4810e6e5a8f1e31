//! Database layer with `SeaORM` entities and the relational patient store.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - A [`PatientStore`](pcms_core::patient::PatientStore) over the database
//! - Database migrations
//! - Backend selection between memory and database

pub mod backend;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use backend::PatientBackend;
pub use repositories::SeaOrmPatientStore;

use pcms_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool to the configured database.
///
/// An in-memory SQLite database exists per connection, so its pool is
/// pinned to a single connection.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    if config.url.starts_with("sqlite::memory:") {
        options.max_connections(1).min_connections(1);
    } else {
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections);
    }
    options.sqlx_logging(false);

    Database::connect(options).await
}
