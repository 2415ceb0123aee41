//! The key-ordered document assembled from a form and published as JSON.

use std::fmt;
use std::path::PathBuf;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entry::{EntryType, keys};
use crate::record::SubRecord;

/// A top-level document value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentValue {
    Text(String),
    Records(Vec<SubRecord>),
}

impl DocumentValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Records(_) => None,
        }
    }

    #[must_use]
    pub fn as_records(&self) -> Option<&[SubRecord]> {
        match self {
            Self::Records(records) => Some(records),
            Self::Text(_) => None,
        }
    }
}

/// Which image an attachment is. Decides the upload key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Main,
    /// Sub image carrying the stable sequence number of its block.
    SubImage { seq: u32 },
}

/// Where the resolved URL of an attachment goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentTarget {
    /// A top-level text field.
    Field(&'static str),
    /// The `URL` of the record at `position` in a record collection.
    RecordUrl {
        collection: &'static str,
        position: usize,
    },
}

/// A local file waiting to be uploaded before the document can be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub kind: AttachmentKind,
    pub local_path: PathBuf,
    pub target: AttachmentTarget,
}

/// Ordered mapping of top-level keys to values for one entry.
///
/// Insertion order is the serialization order. Pending attachments are
/// bookkeeping for the publisher and never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    entry_type: EntryType,
    entries: Vec<(String, DocumentValue)>,
    attachments: Vec<PendingAttachment>,
}

impl Document {
    #[must_use]
    pub const fn new(entry_type: EntryType) -> Self {
        Self {
            entry_type,
            entries: Vec::new(),
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Insert or replace a value. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: DocumentValue) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, DocumentValue::Text(value.into()));
    }

    pub fn insert_records(&mut self, key: impl Into<String>, records: Vec<SubRecord>) {
        self.insert(key, DocumentValue::Records(records));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(DocumentValue::as_text)
    }

    #[must_use]
    pub fn records(&self, key: &str) -> Option<&[SubRecord]> {
        self.get(key).and_then(DocumentValue::as_records)
    }

    /// Keys in serialization order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry's unique identifier (`UniqueEventID`, `UniqueTripID`, ...).
    #[must_use]
    pub fn unique_id(&self) -> Option<&str> {
        self.text(self.entry_type.id_field())
    }

    pub fn attach(&mut self, attachment: PendingAttachment) {
        self.attachments.push(attachment);
    }

    #[must_use]
    pub fn pending_attachments(&self) -> &[PendingAttachment] {
        &self.attachments
    }

    #[must_use]
    pub fn has_pending_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Write a resolved URL into its target. Returns `false` when the target
    /// does not exist in this document.
    pub fn set_attachment_url(&mut self, target: AttachmentTarget, url: impl Into<String>) -> bool {
        let url = url.into();
        match target {
            AttachmentTarget::Field(key) => {
                self.insert_text(key, url);
                true
            }
            AttachmentTarget::RecordUrl {
                collection,
                position,
            } => {
                let record = self
                    .entries
                    .iter_mut()
                    .find(|(k, _)| k == collection)
                    .and_then(|(_, value)| match value {
                        DocumentValue::Records(records) => records.get_mut(position),
                        DocumentValue::Text(_) => None,
                    });
                match record {
                    Some(record) => {
                        record.url = Some(url);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Remove an attachment once its URL has been substituted.
    pub fn clear_attachment(&mut self, target: AttachmentTarget) {
        self.attachments.retain(|attachment| attachment.target != target);
    }

    /// Serialize as 2-space indented JSON in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; does not occur for well-formed documents.
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a published document object with an EntryType field")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Document, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = access.next_entry::<String, DocumentValue>()? {
                    entries.push((key, value));
                }

                let entry_type = entries
                    .iter()
                    .find(|(k, _)| k == keys::ENTRY_TYPE)
                    .and_then(|(_, v)| v.as_text())
                    .ok_or_else(|| <A::Error as de::Error>::missing_field(keys::ENTRY_TYPE))?
                    .parse::<EntryType>()
                    .map_err(<A::Error as de::Error>::custom)?;

                Ok(Document {
                    entry_type,
                    entries,
                    attachments: Vec::new(),
                })
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
