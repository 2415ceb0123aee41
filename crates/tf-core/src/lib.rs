//! # tf-core
//!
//! Form data model, sub-record extraction, document assembly, and validation
//! for the trailfinder publisher.
//!
//! This crate provides the pieces every other trailfinder crate builds on:
//! - Field and field-group types produced by the form layer
//! - The label-positional sub-record extractor and its typed alternative
//! - Entry forms (`Event`, `Trip`, `Report`) and the drafts that hold them
//! - The key-ordered [`Document`] assembled for publishing
//! - Required-field validation

pub mod document;
pub mod entry;
pub mod errors;
pub mod extract;
pub mod field;
pub mod forms;
pub mod record;
pub mod validate;

pub use document::{AttachmentKind, AttachmentTarget, Document, DocumentValue, PendingAttachment};
pub use entry::EntryType;
pub use errors::{CoreError, ValidationError};
pub use extract::{LabelScheme, extract_sub_records};
pub use field::{Field, FieldGroup};
pub use forms::{Draft, EventForm, ReportForm, SubImageBlock, SubImageList, TripForm};
pub use record::{SubRecord, SubRecordBlock, SubRecordInput};
pub use validate::validate;
