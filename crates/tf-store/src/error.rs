//! Upload error types.

use std::path::PathBuf;

/// Errors that can occur while uploading an image.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The local file could not be read.
    #[error("failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote key is not usable.
    #[error("invalid upload key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// The object store rejected or failed the transfer (network, auth).
    #[error("failed to upload {key}: {source}")]
    Store {
        key: String,
        #[source]
        source: object_store::Error,
    },

    /// The store client could not be built from configuration.
    #[error("object store configuration error: {0}")]
    Config(String),
}
