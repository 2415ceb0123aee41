//! Remote key and content-type derivation.
//!
//! Keys are pure functions of the entry's unique ID, the attachment kind and
//! the file extension. Sub images are numbered by their block's sequence
//! number, so re-uploading a block always targets the same key and the
//! previous object is overwritten.

use std::path::Path;

use tf_core::AttachmentKind;

use crate::error::UploadError;

/// Extension used when the local file has none.
pub const DEFAULT_EXTENSION: &str = "webp";

/// `<id>/main.<ext>`
#[must_use]
pub fn main_image_key(unique_id: &str, ext: &str) -> String {
    format!("{unique_id}/main.{ext}")
}

/// `<id>/subImages/image<n>.<ext>`
#[must_use]
pub fn sub_image_key(unique_id: &str, n: u32, ext: &str) -> String {
    format!("{unique_id}/subImages/image{n}.{ext}")
}

/// Key for an attachment of the given kind.
#[must_use]
pub fn derive_key(unique_id: &str, kind: AttachmentKind, ext: &str) -> String {
    match kind {
        AttachmentKind::Main => main_image_key(unique_id, ext),
        AttachmentKind::SubImage { seq } => sub_image_key(unique_id, seq, ext),
    }
}

/// Lowercased extension of `path`, or [`DEFAULT_EXTENSION`].
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_ascii_lowercase)
}

/// Content type for an image extension, `default` when unrecognized.
#[must_use]
pub fn content_type_for(ext: &str, default: &str) -> String {
    let known = match ext {
        "webp" => "image/webp",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => default,
    };
    known.to_string()
}

/// Check that `unique_id` can serve as the first key segment.
///
/// # Errors
///
/// Returns `UploadError::InvalidKey` for empty IDs, IDs containing a path
/// separator, and the relative segments `.` and `..`.
pub fn check_unique_id(unique_id: &str) -> Result<(), UploadError> {
    let reason = if unique_id.is_empty() {
        Some("unique ID is empty")
    } else if unique_id.contains(['/', '\\']) {
        Some("unique ID contains a path separator")
    } else if unique_id == "." || unique_id == ".." {
        Some("unique ID is a relative path segment")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(UploadError::InvalidKey {
            key: unique_id.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
