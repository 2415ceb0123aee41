//! Publish error types.

use std::path::PathBuf;

use tf_core::ValidationError;
use tf_store::UploadError;

/// Errors that can occur while publishing a document.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Required fields are missing; nothing was uploaded or written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An attachment upload failed; nothing was written.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The document still references local files that were never uploaded.
    #[error("{0} attachment(s) have not been uploaded")]
    UnresolvedAttachments(usize),

    /// A field used in the output file name cannot form a file name.
    #[error("cannot build output file name from {field}: {reason}")]
    InvalidTarget { field: &'static str, reason: String },

    /// The output directory could not be created.
    #[error("Failed to create output folder {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
