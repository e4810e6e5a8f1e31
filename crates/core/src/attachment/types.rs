//! Attachment types and data structures.

use bytes::Bytes;

/// Content type assumed when an upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// One uploaded file belonging to a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalAttachment {
    /// File name; the lookup key within the patient's collection.
    pub file_name: String,
    /// MIME type supplied at upload.
    pub content_type: String,
    /// Raw file contents.
    pub contents: Bytes,
}

impl ClinicalAttachment {
    /// Create an attachment.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        contents: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            contents: contents.into(),
        }
    }

    /// Size of the contents in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.contents.len()
    }
}
