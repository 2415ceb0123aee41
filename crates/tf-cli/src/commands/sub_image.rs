use tf_core::{SubRecordBlock, SubRecordInput};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{AddSubImageArgs, RemoveSubImageArgs};
use crate::draft_file;
use crate::output::output;

use super::types::{SubImageAddedResponse, SubImageRemovedResponse};

/// Handle `tfp add-sub-image`.
pub fn handle_add(args: &AddSubImageArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&add(args)?, flags.format)
}

/// Handle `tfp remove-sub-image`.
pub fn handle_remove(args: &RemoveSubImageArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&remove(args)?, flags.format)
}

pub fn add(args: &AddSubImageArgs) -> anyhow::Result<SubImageAddedResponse> {
    let mut draft = draft_file::load(&args.draft)?;
    let entry = SubRecordBlock::Typed(SubRecordInput {
        name: args.name.clone(),
        url: args.url.clone(),
        description: args.description.clone(),
    });
    let seq = draft.sub_images_mut().add(entry, args.image.clone())?;
    draft_file::save(&args.draft, &draft)?;

    Ok(SubImageAddedResponse {
        draft: args.draft.clone(),
        seq,
    })
}

pub fn remove(args: &RemoveSubImageArgs) -> anyhow::Result<SubImageRemovedResponse> {
    let mut draft = draft_file::load(&args.draft)?;
    draft.sub_images_mut().remove(args.seq)?;
    draft_file::save(&args.draft, &draft)?;

    Ok(SubImageRemovedResponse {
        draft: args.draft.clone(),
        removed: args.seq,
        remaining: draft.sub_images().len(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tf_core::{Draft, EntryType};

    use super::*;

    fn blank_event(dir: &Path) -> PathBuf {
        let path = dir.join("hike.json");
        let draft = Draft::new(EntryType::Event, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
        draft_file::save(&path, &draft).unwrap();
        path
    }

    fn add_named(draft: &Path, name: &str) -> u32 {
        add(&AddSubImageArgs {
            draft: draft.to_path_buf(),
            name: Some(name.into()),
            url: None,
            description: None,
            image: None,
        })
        .unwrap()
        .seq
    }

    #[test]
    fn sequence_numbers_survive_removal() {
        let dir = tempfile::tempdir().unwrap();
        let draft = blank_event(dir.path());

        assert_eq!(add_named(&draft, "a"), 1);
        assert_eq!(add_named(&draft, "b"), 2);
        let removed = remove(&RemoveSubImageArgs {
            draft: draft.clone(),
            seq: 1,
        })
        .unwrap();
        assert_eq!(removed.remaining, 1);
        assert_eq!(add_named(&draft, "c"), 3);

        let loaded = draft_file::load(&draft).unwrap();
        let seqs: Vec<u32> = loaded.sub_images().iter().map(|block| block.seq).collect();
        assert_eq!(seqs, vec![2, 3]);
    }

    #[test]
    fn removing_unknown_block_fails() {
        let dir = tempfile::tempdir().unwrap();
        let draft = blank_event(dir.path());
        let err = remove(&RemoveSubImageArgs { draft, seq: 9 }).unwrap_err();
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn exhausted_numbering_fails_without_touching_the_draft() {
        let dir = tempfile::tempdir().unwrap();
        let draft = dir.path().join("hike.json");
        let content = r#"{"EntryType":"Event","SubImages":{"NextSeq":4294967295}}"#;
        std::fs::write(&draft, content).unwrap();

        let err = add(&AddSubImageArgs {
            draft: draft.clone(),
            name: Some("late".into()),
            url: None,
            description: None,
            image: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("exhausted"));
        assert_eq!(std::fs::read_to_string(&draft).unwrap(), content);
    }

    #[test]
    fn image_only_block_becomes_pending_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let draft = blank_event(dir.path());
        add(&AddSubImageArgs {
            draft: draft.clone(),
            name: None,
            url: None,
            description: None,
            image: Some(PathBuf::from("ridge.webp")),
        })
        .unwrap();

        let doc = draft_file::load(&draft).unwrap().assemble();
        assert_eq!(doc.pending_attachments().len(), 1);
    }
}
