//! Label-positional sub-record extraction.
//!
//! A repeatable block arrives as an ordered list of labeled inputs. The only
//! signals available are the input's shape (free-text area or single line)
//! and the label displayed right before it:
//!
//! - a free-text area always fills `Description`;
//! - a single-line input fills `Name` or `URL` when its label matches the
//!   block's [`LabelScheme`], and is ignored otherwise.
//!
//! A key is recorded as soon as a recognized input is seen, even when its
//! value is empty. Groups that recognize nothing are dropped without error,
//! and inputs out of the usual order simply produce whatever keys their
//! labels name.

use crate::field::FieldGroup;
use crate::record::{SubRecord, SubRecordBlock};

/// The two labels that identify the `Name` and `URL` inputs of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelScheme {
    pub name_label: &'static str,
    pub url_label: &'static str,
}

impl LabelScheme {
    /// Sub-image blocks (`SubImages`).
    pub const SUB_IMAGE: Self = Self {
        name_label: "Sub Image Name:",
        url_label: "Sub Image URL:",
    };

    /// Related-event blocks of a trip (`RelatedEvents`).
    pub const RELATED_EVENT: Self = Self {
        name_label: "Event Name:",
        url_label: "Event URL:",
    };
}

/// Extract one record per group, preserving group order and dropping groups
/// that yield no key.
#[must_use]
pub fn extract_sub_records<'a, I>(groups: I, scheme: &LabelScheme) -> Vec<SubRecord>
where
    I: IntoIterator<Item = &'a FieldGroup>,
{
    let mut records = Vec::new();
    for (index, group) in groups.into_iter().enumerate() {
        let record = extract_group(group, scheme);
        if record.is_empty() {
            tracing::debug!(index, "dropping sub-record group with no recognized field");
            continue;
        }
        records.push(record);
    }
    records
}

/// Extract records from draft blocks, which may mix field groups and typed
/// inputs. Same drop policy as [`extract_sub_records`].
#[must_use]
pub fn extract_blocks<'a, I>(blocks: I, scheme: &LabelScheme) -> Vec<SubRecord>
where
    I: IntoIterator<Item = &'a SubRecordBlock>,
{
    blocks
        .into_iter()
        .map(|block| block.to_record(scheme))
        .filter(|record| !record.is_empty())
        .collect()
}

/// Recover the record for a single group. May be empty.
#[must_use]
pub fn extract_group(group: &FieldGroup, scheme: &LabelScheme) -> SubRecord {
    let mut record = SubRecord::default();
    for field in &group.fields {
        if field.multiline {
            record.description = Some(field.value.clone());
        } else if field.label == scheme.name_label {
            record.name = Some(field.value.clone());
        } else if field.label == scheme.url_label {
            record.url = Some(field.value.clone());
        }
    }
    record
}
