//! Image link naming rules and upload format checks.
//!
//! An image link is a bare filename (no directories) stored on the owning
//! row. The file itself lives in the subdirectory of its [`ImageKind`]
//! under the configured image root, and is served statically from
//! `/api/v1/images/{kind}/{filename}`.

use image::ImageFormat;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum request body for single-image multipart forms (10 MiB).
pub const MAX_IMAGE_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Maximum request body for multi-image gallery uploads (30 MiB).
pub const MAX_GALLERY_UPLOAD_BYTES: usize = 30 * 1024 * 1024;

/// Longest filename stem kept after sanitizing.
const MAX_STEM_LEN: usize = 64;

/// File extensions accepted for uploaded images.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Which entity an image belongs to. Each kind has its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Client,
    Member,
    Gallery,
}

impl ImageKind {
    /// All kinds, used to create the directory tree at startup.
    pub const ALL: [ImageKind; 3] = [ImageKind::Client, ImageKind::Member, ImageKind::Gallery];

    /// Subdirectory name under the image root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ImageKind::Client => "clients",
            ImageKind::Member => "members",
            ImageKind::Gallery => "gallery",
        }
    }

    /// Stem used when the entity's name sanitizes to nothing.
    pub fn fallback_stem(self) -> &'static str {
        match self {
            ImageKind::Client => "client",
            ImageKind::Member => "member",
            ImageKind::Gallery => "gallery",
        }
    }
}

/// Reduce free text to a filesystem-safe filename stem.
///
/// Every character that is not an ASCII letter or digit becomes `_`, and
/// the result is capped at 64 characters. Empty (or all-whitespace) input
/// yields `fallback`.
///
/// ```
/// use ajfses_core::images::sanitize_stem;
///
/// assert_eq!(sanitize_stem("Acme Corp.", "client"), "Acme_Corp_");
/// assert_eq!(sanitize_stem("  ", "client"), "client");
/// ```
pub fn sanitize_stem(text: &str, fallback: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_STEM_LEN)
        .collect()
}

/// Build the stored filename for an entity image: `{id}_{stem}.{ext}`.
pub fn image_filename(id: DbId, stem: &str, ext: &str) -> String {
    format!("{id}_{stem}.{ext}")
}

/// Name of the temporary backup kept while an image is being replaced.
///
/// `"10_Acme.jpg"` becomes `".10_Acme.jpg.bak"`. Stored names always start
/// with the row id, so a backup can never collide with an
/// [`image_filename`] result.
pub fn backup_filename(filename: &str) -> String {
    format!(".{filename}.bak")
}

/// Decide the stored extension for an upload, rejecting non-images.
///
/// The content must sniff as PNG, JPEG, GIF or WebP. If the client-supplied
/// filename carries an extension it must be on [`ALLOWED_EXTENSIONS`] and is
/// kept (lowercased); otherwise the sniffed format's canonical extension is
/// used.
pub fn resolve_extension(original_filename: Option<&str>, bytes: &[u8]) -> Result<String, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("Uploaded image is empty".into()));
    }

    let format = image::guess_format(bytes)
        .ok()
        .filter(|f| {
            matches!(
                f,
                ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP
            )
        })
        .ok_or_else(|| {
            CoreError::Validation(
                "Uploaded file is not a supported image (png, jpeg, gif, webp)".into(),
            )
        })?;

    let declared = original_filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty());

    match declared {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        Some(ext) => Err(CoreError::Validation(format!(
            "Unsupported image extension '.{ext}'. Supported: {}",
            ALLOWED_EXTENSIONS.join(", ")
        ))),
        None => Ok(canonical_extension(format).to_string()),
    }
}

fn canonical_extension(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        _ => "jpg",
    }
}
