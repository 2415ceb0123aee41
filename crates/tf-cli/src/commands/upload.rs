use std::path::Path;

use tf_core::{AttachmentKind, CoreError, Draft};
use tf_store::{BlobUploader, RemoteAsset};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UploadArgs;
use crate::context::AppContext;
use crate::draft_file;
use crate::output::output;

use super::types::UploadResponse;

/// Handle `tfp upload`.
pub async fn handle(args: &UploadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut draft = draft_file::load(&args.draft)?;
    let uploader = ctx.uploader()?;
    let kind = args
        .sub
        .map_or(AttachmentKind::Main, |seq| AttachmentKind::SubImage { seq });

    let (key, url) = upload_into(
        &mut draft,
        kind,
        &args.file,
        &uploader,
        &ctx.config.store.default_content_type,
    )
    .await?;
    draft_file::save(&args.draft, &draft)?;

    output(
        &UploadResponse {
            draft: args.draft.clone(),
            key,
            url,
        },
        flags.format,
    )
}

/// Upload `file` for the `kind` slot of `draft` and record the URL there.
///
/// Returns the remote key and URL.
pub async fn upload_into<U: BlobUploader>(
    draft: &mut Draft,
    kind: AttachmentKind,
    file: &Path,
    uploader: &U,
    default_content_type: &str,
) -> anyhow::Result<(String, String)> {
    if let AttachmentKind::SubImage { seq } = kind
        && draft.sub_images().get(seq).is_none()
    {
        return Err(CoreError::SubImageNotFound(seq).into());
    }

    let asset = RemoteAsset::for_image(draft.unique_id(), kind, file, default_content_type)?;
    let url = uploader.upload(&asset).await?;

    match kind {
        AttachmentKind::Main => draft.set_main_image_url(url.as_str()),
        AttachmentKind::SubImage { seq } => draft.set_sub_image_url(seq, url.as_str())?,
    }
    Ok((asset.remote_key, url))
}
