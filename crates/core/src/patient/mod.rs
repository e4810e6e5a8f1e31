//! Patient records.
//!
//! This module provides the patient side of the system:
//! - Domain types and caller input
//! - The pluggable patient store and its in-memory implementation
//! - The repository combining patient and attachment storage
//! - The service every external caller goes through

mod error;
mod repository;
mod service;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use error::PatientError;
pub use repository::{PatientRepository, StoreRepository};
pub use service::PatientService;
pub use store::{InMemoryPatientStore, PatientStore};
pub use types::{Patient, PatientInput, search_term};
