//! Core business logic for PCMS.
//!
//! This crate contains the patient-record and clinical-attachment logic with
//! ZERO web or database dependencies. Durable storage is plugged in from the
//! outside by implementing [`patient::PatientStore`].
//!
//! # Layers
//!
//! ```text
//! PatientService ──► PatientRepository ──┬──► PatientStore (pluggable)
//!                                         └──► AttachmentStore (in memory)
//! ```
//!
//! # Modules
//!
//! - `patient` - Patient records, store abstraction, repository and service
//! - `attachment` - Clinical attachments and the per-patient attachment store

pub mod attachment;
pub mod patient;

pub use attachment::{AttachmentStore, ClinicalAttachment};
pub use patient::{
    InMemoryPatientStore, Patient, PatientError, PatientInput, PatientRepository, PatientService,
    PatientStore, StoreRepository,
};
