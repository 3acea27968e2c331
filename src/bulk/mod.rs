//! Bulk status update encoder (verb module)
//!
//! Validates and encodes bulk status changes, file uploads and CSV templates.
//! Every check here runs before anything reaches the network.

mod error;
mod status;
mod template;
mod upload;

pub use error::ValidationError;
pub use status::{BeneficiaryStatus, BulkUpdateRequest, BULK_UPDATE_OPERATION, BULK_UPDATE_TAGS};
pub use template::CsvTemplate;
pub use upload::{
    decode_file_upload, encode_file_upload, strip_data_uri_prefix, StatusUploadSubmission,
    UploadedFile, ValidatedUpload, ALLOWED_MIME_TYPES, UPLOAD_OPERATION, UPLOAD_TAGS,
};
