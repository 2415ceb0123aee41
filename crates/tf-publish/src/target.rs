use std::path::{Path, PathBuf};

use tf_core::entry::keys;
use tf_core::{Document, EntryType};

use crate::error::PublishError;

/// Where a document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub directory: PathBuf,
    pub filename: String,
}

impl PublishTarget {
    /// Compute the target for `document` below `output_root`.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::InvalidTarget` when a naming field is empty,
    /// contains a path separator, or is `.`/`..`.
    pub fn for_document(output_root: &Path, document: &Document) -> Result<Self, PublishError> {
        let entry_type = document.entry_type();
        let id = name_part(document, entry_type.id_field())?;

        let filename = match entry_type {
            EntryType::Event => format!("{id}_event.json"),
            EntryType::Trip => format!("{id}_trip.json"),
            EntryType::Report => {
                let name = name_part(document, keys::REPORT_NAME)?;
                format!("{id}_{name}.json")
            }
        };

        let directory = match entry_type.output_subdir() {
            Some(subdir) => output_root.join(subdir),
            None => output_root.to_path_buf(),
        };

        Ok(Self {
            directory,
            filename,
        })
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

fn name_part<'a>(document: &'a Document, field: &'static str) -> Result<&'a str, PublishError> {
    let value = document.text(field).unwrap_or_default();
    let reason = if value.is_empty() {
        Some("value is empty")
    } else if value.contains(['/', '\\']) {
        Some("value contains a path separator")
    } else if value == "." || value == ".." {
        Some("value is a relative path segment")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PublishError::InvalidTarget {
            field,
            reason: reason.to_string(),
        }),
        None => Ok(value),
    }
}
