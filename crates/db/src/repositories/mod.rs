//! Repository implementations for data access.
//!
//! These plug the database into the store abstractions defined by the core
//! crate, hiding the `SeaORM` details from the rest of the application.

pub mod patient;

pub use patient::SeaOrmPatientStore;
