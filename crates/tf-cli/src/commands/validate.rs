use anyhow::Context;
use tf_core::{Draft, validate};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DraftArgs;
use crate::draft_file;
use crate::output::output;

use super::types::ValidateResponse;

/// Handle `tfp validate`. Prints the verdict, then fails if the draft is
/// not publishable.
pub fn handle(args: &DraftArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = draft_file::load(&args.draft)?;
    let response = run(&draft);
    output(&response, flags.format)?;

    let doc = draft.assemble();
    validate(&doc)
        .map(|_| ())
        .with_context(|| format!("{} is not ready to publish", args.draft.display()))
}

pub fn run(draft: &Draft) -> ValidateResponse {
    let doc = draft.assemble();
    let missing = match validate(&doc) {
        Ok(_) => Vec::new(),
        Err(error) => error.missing().to_vec(),
    };

    ValidateResponse {
        valid: missing.is_empty(),
        entry_type: draft.entry_type(),
        unique_id: draft.unique_id().to_string(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tf_core::entry::keys;
    use tf_core::{EntryType, ReportForm};

    use super::*;

    #[test]
    fn blank_event_lists_every_required_field_but_creation_date() {
        let draft = Draft::new(EntryType::Event, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
        let response = run(&draft);

        assert!(!response.valid);
        assert_eq!(
            response.missing,
            vec![
                keys::EVENT_NAME,
                keys::EVENT_DATE,
                keys::UNIQUE_EVENT_ID,
                keys::UNIQUE_KOMOOT_URL,
                keys::DESCRIPTION,
                keys::TRANSPORTATION,
            ]
        );
    }

    #[test]
    fn complete_report_is_valid() {
        let draft = Draft::Report(ReportForm {
            report_date: "2024-06-02".into(),
            report_type: "Trip".into(),
            report_name: "Alps".into(),
            unique_report_id: "r7".into(),
            ..ReportForm::default()
        });
        let response = run(&draft);
        assert!(response.valid);
        assert!(response.missing.is_empty());
        assert_eq!(response.unique_id, "r7");
    }
}
