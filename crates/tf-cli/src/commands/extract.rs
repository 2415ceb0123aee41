use tf_core::entry::keys;
use tf_core::{Draft, EntryType};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DraftArgs;
use crate::draft_file;
use crate::output::output;

use super::types::ExtractResponse;

/// Handle `tfp extract`.
pub fn handle(args: &DraftArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = draft_file::load(&args.draft)?;
    output(&run(&draft), flags.format)
}

pub fn run(draft: &Draft) -> ExtractResponse {
    let doc = draft.assemble();
    let collection = |key: &str| doc.records(key).map(<[_]>::to_vec).unwrap_or_default();

    ExtractResponse {
        sub_images: collection(keys::SUB_IMAGES),
        related_events: (doc.entry_type() == EntryType::Trip)
            .then(|| collection(keys::RELATED_EVENTS)),
    }
}
