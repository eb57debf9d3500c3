//! Multipart form collection for image-bearing entities.
//!
//! Handlers read the whole form up front with [`UploadForm::read`] so all
//! validation happens before anything touches the database or disk.

use std::collections::HashMap;

use ajfses_core::images::{image_filename, resolve_extension, sanitize_stem, ImageKind};
use ajfses_core::types::DbId;
use ajfses_core::validation::normalize_optional;
use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// One file part of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Text fields and file parts of a multipart request.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl UploadForm {
    /// Drain a multipart body. Malformed bodies, and bodies over the route's
    /// size limit, are rejected with 400.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    // Browsers send an empty part when no file was chosen.
                    if bytes.is_empty() && file_name.is_empty() {
                        continue;
                    }
                    let file_name = Some(file_name).filter(|n| !n.is_empty());
                    form.files
                        .entry(name)
                        .or_default()
                        .push(UploadedFile { file_name, bytes });
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// A text field exactly as sent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The first file sent under `name`.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name).and_then(|files| files.first())
    }

    /// Every file sent under `name`, in request order.
    pub fn files(&self, name: &str) -> &[UploadedFile] {
        self.files.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Parse an optional id field. Non-numeric input is a 400.
    pub fn id(&self, name: &str) -> AppResult<Option<DbId>> {
        normalize_optional(self.text(name))
            .map(|v| {
                v.parse::<DbId>()
                    .map_err(|_| AppError::BadRequest(format!("{name} must be a numeric id")))
            })
            .transpose()
    }
}

/// An upload that passed the image format checks, waiting for its row id.
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    ext: String,
    bytes: Bytes,
}

impl ValidatedImage {
    /// Sniff and check an uploaded file.
    pub fn from_upload(file: &UploadedFile) -> AppResult<Self> {
        let ext = resolve_extension(file.file_name.as_deref(), &file.bytes)?;
        Ok(Self {
            ext,
            bytes: file.bytes.clone(),
        })
    }

    /// Validate the optional file under `name`.
    pub fn from_form(form: &UploadForm, name: &str) -> AppResult<Option<Self>> {
        form.file(name).map(Self::from_upload).transpose()
    }

    /// Stored filename for the row `id`, derived from its display name.
    pub fn filename_for(&self, kind: ImageKind, id: DbId, display_name: &str) -> String {
        let stem = sanitize_stem(display_name, kind.fallback_stem());
        image_filename(id, &stem, &self.ext)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
