//! Local validation errors
//!
//! Raised before any network call; `Display` is the message shown to the user.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No entities selected for a bulk update
    EmptySelection,
    /// Bulk update or upload without a target status
    MissingStatus,
    /// Unknown status value
    UnknownStatus(String),
    /// Uploaded file type outside the allow-list
    DisallowedFileType { name: String, mime_type: String },
    /// File encoded to nothing
    EmptyFile(String),
    /// Upload payload is not valid base64
    CorruptPayload,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptySelection => write!(f, "Select at least one beneficiary"),
            ValidationError::MissingStatus => write!(f, "Choose a target status"),
            ValidationError::UnknownStatus(s) => write!(f, "Unknown status '{}'", s),
            ValidationError::DisallowedFileType { name, mime_type } => {
                write!(f, "File '{}' has type '{}'; only CSV or Excel files are accepted", name, mime_type)
            }
            ValidationError::EmptyFile(name) => write!(f, "File '{}' is empty", name),
            ValidationError::CorruptPayload => write!(f, "Upload payload is not valid base64"),
        }
    }
}

impl std::error::Error for ValidationError {}
