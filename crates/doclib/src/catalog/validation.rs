//! Upload checks that run before any storage call.

use crate::error::ValidationError;
use crate::model::UploadFile;

/// Checks an upload before any storage call.
///
/// A title of only whitespace is rejected, but an accepted title is stored
/// exactly as supplied.
pub fn validate_upload(upload: &UploadFile, title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    if upload.file_name.trim().is_empty() || upload.bytes.is_empty() {
        return Err(ValidationError::MissingFile);
    }

    if !is_pdf_file_name(&upload.file_name) {
        return Err(ValidationError::NotPdf {
            file_name: upload.file_name.clone(),
        });
    }

    Ok(())
}

/// Case-insensitive `.pdf` suffix check.
pub fn is_pdf_file_name(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".pdf")
}
