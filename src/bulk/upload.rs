//! File uploads for server-side bulk processing

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};
use tracing::debug;

use crate::builder::{BuildError, MutationBuilder};
use crate::query::GqlValue;
use crate::request::MutationRequest;
use super::error::ValidationError;
use super::status::BeneficiaryStatus;

pub const ALLOWED_MIME_TYPES: &[&str] = &["text/csv", "application/csv", "application/vnd.ms-excel"];

pub const UPLOAD_OPERATION: &str = "bulkUpdateBeneficiaryStatusFromFile";
pub const UPLOAD_TAGS: &str = "SOCIAL_PROTECTION_MUTATION_UPLOAD_BENEFICIARY_STATUS";

/// A file picked by the user
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Compares the essence only, so `text/csv; charset=utf-8` is accepted
    pub fn is_allowed(&self) -> bool {
        let essence = self
            .mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        ALLOWED_MIME_TYPES.contains(&essence.as_str())
    }
}

const BASE64_MARKER: &str = ";base64,";

/// Payload part of a `data:<mime>;base64,<payload>` URI
///
/// MIME parameters may contain commas, so the split is on the base64 marker.
pub fn strip_data_uri_prefix(uri: &str) -> &str {
    if !uri.starts_with("data:") {
        return uri;
    }
    match uri.rsplit_once(BASE64_MARKER) {
        Some((_, payload)) => payload,
        None => uri,
    }
}

/// Base64 payload of an allowed file
///
/// The type check happens before the content is touched.
pub fn encode_file_upload(file: &UploadedFile) -> Result<String, ValidationError> {
    if !file.is_allowed() {
        return Err(ValidationError::DisallowedFileType {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
        });
    }
    let payload = BASE64.encode(&file.bytes);
    debug!(target: "spquery::bulk", file = %file.name, bytes = file.bytes.len(), "encoded upload");
    Ok(payload)
}

/// Inverse of `encode_file_upload`, as the server performs it
pub fn decode_file_upload(payload: &str) -> Result<Vec<u8>, ValidationError> {
    BASE64
        .decode(strip_data_uri_prefix(payload))
        .map_err(|_| ValidationError::CorruptPayload)
}

/// A status change driven by an uploaded file
#[derive(Debug, Clone)]
pub struct StatusUploadSubmission {
    pub file: UploadedFile,
    pub target_status: Option<BeneficiaryStatus>,
    /// Benefit plan the file applies to, if any
    pub benefit_plan: Option<String>,
}

/// A submission that passed local validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedUpload {
    pub file_name: String,
    pub payload: String,
    pub status: BeneficiaryStatus,
    pub benefit_plan: Option<String>,
}

impl StatusUploadSubmission {
    /// Reject disallowed types, empty payloads and missing status locally
    pub fn validate(&self) -> Result<ValidatedUpload, ValidationError> {
        let payload = encode_file_upload(&self.file)?;
        if payload.is_empty() {
            return Err(ValidationError::EmptyFile(self.file.name.clone()));
        }
        let status = self.target_status.ok_or(ValidationError::MissingStatus)?;
        Ok(ValidatedUpload {
            file_name: self.file.name.clone(),
            payload,
            status,
            benefit_plan: self.benefit_plan.clone(),
        })
    }
}

impl ValidatedUpload {
    pub fn to_variables(&self) -> Value {
        json!({
            "input": {
                "file": self.payload,
                "fileName": self.file_name,
                "status": self.status.as_str(),
                "benefitPlanId": self.benefit_plan,
            }
        })
    }

    pub fn to_mutation(&self, label: impl Into<String>) -> Result<MutationRequest, BuildError> {
        let mut builder = MutationBuilder::new(UPLOAD_OPERATION)
            .input("file", GqlValue::String(self.payload.clone()))
            .input("fileName", GqlValue::String(self.file_name.clone()))
            .input("status", GqlValue::Enum(self.status.as_str().to_string()));
        if let Some(plan) = &self.benefit_plan {
            builder = builder.input("benefitPlanId", GqlValue::String(plan.clone()));
        }
        builder.label(label).tags(UPLOAD_TAGS).build()
    }
}
