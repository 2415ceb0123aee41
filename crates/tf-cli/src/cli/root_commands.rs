use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand};
use tf_core::EntryType;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Start a blank draft for an event, trip or report.
    New(NewArgs),
    /// Append a sub-image block to a draft.
    AddSubImage(AddSubImageArgs),
    /// Remove a sub-image block by its sequence number.
    RemoveSubImage(RemoveSubImageArgs),
    /// Show the sub-records a draft would publish.
    Extract(DraftArgs),
    /// Check that a draft has every required field.
    Validate(DraftArgs),
    /// Upload one image now and store its URL in the draft.
    Upload(UploadArgs),
    /// Upload pending images and write the published document.
    Publish(PublishArgs),
    /// Print the JSON schema of the draft format.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct NewArgs {
    /// Entry type: event, trip or report.
    pub entry_type: EntryType,
    /// Draft file to create.
    pub draft: PathBuf,
    /// Unique ID of the entry.
    #[arg(long)]
    pub id: Option<String>,
    /// What a report is about: event or trip.
    #[arg(long)]
    pub report_type: Option<EntryType>,
    /// Replace an existing draft file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct DraftArgs {
    /// Draft file.
    pub draft: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct AddSubImageArgs {
    /// Draft file.
    pub draft: PathBuf,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Local image to upload for this block on publish.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct RemoveSubImageArgs {
    /// Draft file.
    pub draft: PathBuf,
    /// Sequence number printed by `add-sub-image`.
    pub seq: u32,
}

#[derive(Clone, Debug, Args)]
#[command(group(ArgGroup::new("slot").required(true).args(["main", "sub"])))]
pub struct UploadArgs {
    /// Draft file.
    pub draft: PathBuf,
    /// Upload as the main image.
    #[arg(long)]
    pub main: bool,
    /// Upload for the sub-image block with this sequence number.
    #[arg(long, value_name = "SEQ")]
    pub sub: Option<u32>,
    /// Image file to upload.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct PublishArgs {
    /// Draft file.
    pub draft: PathBuf,
    /// Never contact the image store. Publishing then fails, writing
    /// nothing, if the draft still has local images that need uploading.
    #[arg(long)]
    pub no_upload: bool,
}
