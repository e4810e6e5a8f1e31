//! Patient types and data structures.

use pcms_shared::PatientId;
use serde::{Deserialize, Serialize};

/// Patient fields supplied by a caller when creating or updating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientInput {
    /// Full name.
    pub name: String,
    /// Age in years (0-150).
    pub age: u8,
    /// Contact phone number.
    pub phone_number: String,
    /// Contact email address.
    pub email_address: String,
    /// Postal address.
    pub address: String,
    /// Free-text medical history; may be empty.
    pub medical_history: String,
}

/// Patient domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier, assigned once at creation.
    pub id: PatientId,
    /// Full name.
    pub name: String,
    /// Age in years (0-150).
    pub age: u8,
    /// Contact phone number.
    pub phone_number: String,
    /// Contact email address.
    pub email_address: String,
    /// Postal address.
    pub address: String,
    /// Free-text medical history.
    #[serde(default)]
    pub medical_history: String,
    /// File names of the patient's clinical attachments.
    ///
    /// Filled in by the repository on every read; never persisted.
    #[serde(default)]
    pub clinical_attachments: Vec<String>,
}

impl Patient {
    /// Build a new record from caller input under the given identifier.
    #[must_use]
    pub fn from_input(id: PatientId, input: PatientInput) -> Self {
        Self {
            id,
            name: input.name,
            age: input.age,
            phone_number: input.phone_number,
            email_address: input.email_address,
            address: input.address,
            medical_history: input.medical_history,
            clinical_attachments: Vec::new(),
        }
    }

    /// Overwrite every mutable field from caller input. The identifier is kept.
    pub fn apply(&mut self, input: PatientInput) {
        self.name = input.name;
        self.age = input.age;
        self.phone_number = input.phone_number;
        self.email_address = input.email_address;
        self.address = input.address;
        self.medical_history = input.medical_history;
    }

    /// Ordinal, case-sensitive substring match against the name.
    #[must_use]
    pub fn name_contains(&self, query: &str) -> bool {
        self.name.contains(query)
    }

    /// The record as it should be persisted, without the transient attachment view.
    #[must_use]
    pub fn into_record(self) -> Self {
        Self {
            clinical_attachments: Vec::new(),
            ..self
        }
    }
}

/// Treat an absent or blank search query as "match everything".
#[must_use]
pub fn search_term(query: Option<&str>) -> Option<&str> {
    query.filter(|q| !q.trim().is_empty())
}
