use std::path::Path;

use anyhow::Context;
use tf_core::{AttachmentKind, Draft, PendingAttachment};
use tf_publish::{PublishReport, Publisher, UploadedAsset};
use tf_store::BlobUploader;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PublishArgs;
use crate::context::AppContext;
use crate::draft_file;
use crate::output::output;

/// Handle `tfp publish`.
pub async fn handle(
    args: &PublishArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut draft = draft_file::load(&args.draft)?;
    let publisher = ctx.publisher();

    let report = if args.no_upload || !draft.assemble().has_pending_attachments() {
        publish_local(&draft, &publisher)?
    } else {
        let uploader = ctx.uploader()?;
        publish_uploading(&mut draft, &args.draft, &publisher, &uploader).await?
    };

    output(&report, flags.format)
}

/// Publish a draft whose images are all remote already.
pub fn publish_local(draft: &Draft, publisher: &Publisher) -> anyhow::Result<PublishReport> {
    let doc = draft.assemble();
    let path = publisher.publish(&doc)?;
    Ok(PublishReport {
        entry_type: doc.entry_type(),
        path,
        uploaded: Vec::new(),
    })
}

/// Upload pending images, publish, then store the new URLs in the draft so
/// the next publish does not upload them again.
pub async fn publish_uploading<U: BlobUploader>(
    draft: &mut Draft,
    draft_path: &Path,
    publisher: &Publisher,
    uploader: &U,
) -> anyhow::Result<PublishReport> {
    let mut doc = draft.assemble();
    let pending = doc.pending_attachments().to_vec();
    let report = publisher.publish_with_uploads(&mut doc, uploader).await?;

    record_uploads(draft, &pending, &report.uploaded)?;
    draft_file::save(draft_path, draft)
        .context("document was published but the draft could not be updated")?;
    Ok(report)
}

fn record_uploads(
    draft: &mut Draft,
    pending: &[PendingAttachment],
    uploaded: &[UploadedAsset],
) -> anyhow::Result<()> {
    for (attachment, asset) in pending.iter().zip(uploaded) {
        match attachment.kind {
            AttachmentKind::Main => draft.set_main_image_url(asset.url.as_str()),
            AttachmentKind::SubImage { seq } => draft.set_sub_image_url(seq, asset.url.as_str())?,
        }
    }
    Ok(())
}
