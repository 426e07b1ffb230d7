//! Multipart upload collection
//!
//! Pulls file parts and text fields out of a multipart body and applies the
//! request-level validation: part count and declared media type. Empty file
//! parts are dropped here, matching the behavior the web client expects.

use axum::extract::Multipart;
use pdftools_core::ImageUpload;

use crate::error::ApiError;
use crate::state::Limits;

/// One file part pulled from the form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn into_image_upload(self) -> ImageUpload {
        ImageUpload {
            name: self.name,
            content_type: self.content_type,
            bytes: self.bytes,
        }
    }
}

/// What a route accepts in its file parts.
#[derive(Debug, Clone, Copy)]
pub enum MediaClass {
    Pdf,
    Image,
}

impl MediaClass {
    /// Declared types we let through. `application/octet-stream` is always
    /// accepted; browsers fall back to it for unrecognized files.
    fn allows(self, content_type: &str) -> bool {
        if content_type == "application/octet-stream" {
            return true;
        }
        match self {
            MediaClass::Pdf => content_type == "application/pdf",
            MediaClass::Image => content_type.starts_with("image/"),
        }
    }

    fn rejection(self, content_type: &str) -> ApiError {
        let expected = match self {
            MediaClass::Pdf => "a PDF",
            MediaClass::Image => "an image",
        };
        ApiError::UnsupportedMedia(format!("Expected {}, got {}", expected, content_type))
    }
}

/// Collect every non-empty file part named `files` (or `file`).
/// Unknown fields are ignored.
pub async fn collect_files(
    multipart: &mut Multipart,
    limits: &Limits,
    accept: MediaClass,
) -> Result<Vec<UploadedFile>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "files" && field_name != "file" {
            continue;
        }

        if let Some(content_type) = field.content_type() {
            if !accept.allows(content_type) {
                return Err(accept.rejection(content_type));
            }
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            continue;
        }

        files.push(UploadedFile {
            name,
            content_type,
            bytes: bytes.to_vec(),
        });

        if files.len() > limits.max_files {
            return Err(ApiError::InvalidRequest(format!(
                "Too many files (limit is {})",
                limits.max_files
            )));
        }
    }

    Ok(files)
}

/// Collect the `file` part and the optional `range` text field used by the
/// split route.
pub async fn collect_file_and_range(
    multipart: &mut Multipart,
    accept: MediaClass,
) -> Result<(Option<UploadedFile>, String), ApiError> {
    let mut file = None;
    let mut range = String::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" | "files" => {
                if let Some(content_type) = field.content_type() {
                    if !accept.allows(content_type) {
                        return Err(accept.rejection(content_type));
                    }
                }
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await?;
                if bytes.is_empty() {
                    continue;
                }
                if file.is_some() {
                    return Err(ApiError::InvalidRequest(
                        "Expected a single file".to_string(),
                    ));
                }
                file = Some(UploadedFile {
                    name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "range" => {
                range = field.text().await?;
            }
            _ => {}
        }
    }

    Ok((file, range))
}
