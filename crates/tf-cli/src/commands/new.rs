use anyhow::bail;
use chrono::NaiveDate;
use tf_core::{Draft, EntryType};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NewArgs;
use crate::draft_file;
use crate::output::output;

use super::types::NewDraftResponse;

/// Handle `tfp new`.
pub fn handle(args: &NewArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args, chrono::Local::now().date_naive())?;
    output(&response, flags.format)
}

pub fn run(args: &NewArgs, today: NaiveDate) -> anyhow::Result<NewDraftResponse> {
    if args.draft.exists() && !args.force {
        bail!(
            "{} already exists (use --force to replace it)",
            args.draft.display()
        );
    }

    let mut draft = Draft::new(args.entry_type, today);
    if let Some(id) = &args.id {
        draft.set_unique_id(id.as_str());
    }

    match (&mut draft, args.report_type) {
        (_, None) => {}
        (Draft::Report(form), Some(report_type @ (EntryType::Event | EntryType::Trip))) => {
            form.report_type = report_type.as_str().to_string();
        }
        (Draft::Report(_), Some(EntryType::Report)) => {
            bail!("--report-type must be event or trip");
        }
        (_, Some(_)) => bail!("--report-type only applies to reports"),
    }

    draft_file::save(&args.draft, &draft)?;
    tracing::info!(draft = %args.draft.display(), entry_type = %args.entry_type, "created draft");

    Ok(NewDraftResponse {
        draft: args.draft.clone(),
        entry_type: draft.entry_type(),
        unique_id: draft.unique_id().to_string(),
    })
}
