//! # tf-store
//!
//! Pushes local image files to an S3-compatible object store and hands back
//! the public URL each one will be served from.
//!
//! - [`keys`] derives remote keys (`<id>/main.<ext>`,
//!   `<id>/subImages/image<n>.<ext>`) and content types.
//! - [`BlobUploader`] is the seam the publisher uploads through;
//!   [`ObjectStoreUploader`] implements it over `object_store`, using
//!   `AmazonS3` in production and `InMemory` in tests.
//!
//! Uploads overwrite whatever object already sits under the key. The
//! returned URL is computed from configuration, not read back from the store.

pub mod error;
pub mod keys;
pub mod uploader;

pub use error::UploadError;
pub use uploader::{BlobUploader, ObjectStoreUploader, RemoteAsset};
