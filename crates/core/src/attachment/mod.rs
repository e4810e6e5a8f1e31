//! Clinical attachments.
//!
//! Binary files (scans, reports, lab results) owned by exactly one patient,
//! identified within that patient's collection by file name.

mod store;
mod types;

pub use store::AttachmentStore;
pub use types::{ClinicalAttachment, DEFAULT_CONTENT_TYPE};
