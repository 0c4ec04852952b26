//! Requirements document upload for projects.

use atrium_core::ProjectId;
use atrium_core::normalize::{opt_text, pick};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::instrument;

use super::client::unwrap_record;
use super::resource::ProjectsApi;
use crate::error::{ApiError, ValidationError};

const PDF_MIME: &str = "application/pdf";
/// Upper bound on requirement documents accepted by the backend.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// A requirements PDF, checked by extension and size.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an empty, oversized, or non-PDF file.
    pub fn pdf(file_name: &str, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let file_name = file_name.trim();
        if file_name.is_empty() || bytes.is_empty() {
            return Err(ValidationError::Required("Requirements file"));
        }
        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(ValidationError::UnknownValue {
                field: "file type",
                value: file_name.to_string(),
            });
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::OutOfRange {
                field: "File size (bytes)",
                min: 1,
                max: i64::try_from(MAX_UPLOAD_BYTES).unwrap_or(i64::MAX),
            });
        }
        Ok(Self {
            file_name: file_name.to_string(),
            bytes,
        })
    }
}

/// What the backend reports after storing an upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadResult {
    /// Stored path of the document.
    pub path: Option<String>,
    pub message: Option<String>,
    /// The updated project, when the backend returns it.
    pub project: Option<Value>,
}

impl UploadResult {
    /// Read an upload response. Accepts camelCase or snake_case keys.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let value = unwrap_record(value);
        let path = opt_text(pick(value.get("requirementsPdf"), value.get("requirements_pdf")))
            .or_else(|| opt_text(pick(value.get("filePath"), value.get("file_path"))))
            .or_else(|| opt_text(value.get("path")));
        let message = opt_text(value.get("message"));
        let project = value
            .get("project")
            .filter(|p| p.is_object())
            .cloned()
            .or_else(|| value.get("id").is_some().then(|| value.clone()));
        Self {
            path,
            message,
            project,
        }
    }
}

impl ProjectsApi {
    /// Upload a project's requirements PDF.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the file.
    #[instrument(skip(self, file), fields(project_id = %id, file_name = %file.file_name))]
    pub async fn upload_requirements_pdf(
        &self,
        id: ProjectId,
        file: UploadFile,
    ) -> Result<UploadResult, ApiError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(PDF_MIME)?;
        let form = Form::new().part("requirementsPdf", part);

        let body = self
            .client()
            .post_multipart(&format!("projects/{id}/requirements-pdf"), form)
            .await?;
        Ok(UploadResult::from_value(body))
    }
}
