//! # tf-publish
//!
//! Writes assembled documents to their deterministic location under the
//! output root:
//!
//! | entry  | file                                   |
//! |--------|----------------------------------------|
//! | Event  | `events/<UniqueEventID>_event.json`    |
//! | Trip   | `trips/<UniqueTripID>_trip.json`       |
//! | Report | `<UniqueReportID>_<ReportName>.json`   |
//!
//! Publishing validates first, uploads any pending image attachments through
//! a [`tf_store::BlobUploader`], substitutes the returned URLs, then
//! serializes with 2-space indentation and overwrites the target file.

pub mod error;
pub mod publisher;
pub mod target;

pub use error::PublishError;
pub use publisher::{PublishReport, Publisher, UploadedAsset};
pub use target::PublishTarget;
