use std::path::{Path, PathBuf};

use serde::Serialize;
use tf_core::{AttachmentTarget, Document, EntryType, validate};
use tf_store::{BlobUploader, RemoteAsset};

use crate::error::PublishError;
use crate::target::PublishTarget;

const DEFAULT_CONTENT_TYPE: &str = "image/webp";

/// One attachment uploaded during a publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedAsset {
    pub local_path: PathBuf,
    pub key: String,
    pub url: String,
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub entry_type: EntryType,
    pub path: PathBuf,
    pub uploaded: Vec<UploadedAsset>,
}

/// Writes documents below an output root.
#[derive(Debug, Clone)]
pub struct Publisher {
    output_root: PathBuf,
    default_content_type: String,
}

impl Publisher {
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            default_content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Content type for uploaded files with an unrecognized extension.
    #[must_use]
    pub fn with_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Where `document` would be written.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::InvalidTarget` if the naming fields are unusable.
    pub fn target_for(&self, document: &Document) -> Result<PublishTarget, PublishError> {
        PublishTarget::for_document(&self.output_root, document)
    }

    /// Validate and write `document`, replacing any previous file.
    ///
    /// Serialization happens before anything touches the filesystem, so a
    /// serialization failure leaves no file behind.
    ///
    /// # Errors
    ///
    /// Returns `PublishError` on validation failure, unresolved attachments,
    /// an unusable target name, or directory/serialization/write failure.
    pub fn publish(&self, document: &Document) -> Result<PathBuf, PublishError> {
        validate(document)?;
        if document.has_pending_attachments() {
            return Err(PublishError::UnresolvedAttachments(
                document.pending_attachments().len(),
            ));
        }

        let target = self.target_for(document)?;
        let bytes = document.to_json_pretty()?;

        std::fs::create_dir_all(&target.directory).map_err(|source| PublishError::CreateDir {
            path: target.directory.clone(),
            source,
        })?;

        let path = target.path();
        std::fs::write(&path, &bytes).map_err(|source| PublishError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            entry_type = %document.entry_type(),
            path = %path.display(),
            bytes = bytes.len(),
            "published document"
        );
        Ok(path)
    }

    /// Upload every pending attachment, substitute the returned URLs, then
    /// [`publish`](Self::publish).
    ///
    /// Uploads run in attachment order. URLs are substituted only after all
    /// uploads succeed; on failure the document is left untouched and no file
    /// is written, though objects uploaded before the failure stay in the
    /// store.
    ///
    /// # Errors
    ///
    /// Same as [`publish`](Self::publish), plus `PublishError::Upload`.
    pub async fn publish_with_uploads<U: BlobUploader>(
        &self,
        document: &mut Document,
        uploader: &U,
    ) -> Result<PublishReport, PublishError> {
        validate(document)?;
        self.target_for(document)?;

        let unique_id = document.unique_id().unwrap_or_default().to_string();
        let pending = document.pending_attachments().to_vec();
        let mut resolved: Vec<(AttachmentTarget, UploadedAsset)> =
            Vec::with_capacity(pending.len());

        for attachment in pending {
            let asset = RemoteAsset::for_image(
                &unique_id,
                attachment.kind,
                &attachment.local_path,
                &self.default_content_type,
            )?;
            let url = uploader.upload(&asset).await?;
            resolved.push((
                attachment.target,
                UploadedAsset {
                    local_path: asset.local_path,
                    key: asset.remote_key,
                    url,
                },
            ));
        }

        for (target, uploaded) in &resolved {
            if !document.set_attachment_url(*target, uploaded.url.clone()) {
                tracing::warn!(?target, "attachment target missing from document");
            }
            document.clear_attachment(*target);
        }

        let path = self.publish(document)?;
        Ok(PublishReport {
            entry_type: document.entry_type(),
            path,
            uploaded: resolved.into_iter().map(|(_, uploaded)| uploaded).collect(),
        })
    }
}
