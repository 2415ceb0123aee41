use tf_core::Draft;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `tfp schema`: the JSON schema drafts are written against.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(Draft);
    output(&schema, flags.format)
}

#[cfg(test)]
mod tests {
    use tf_core::Draft;

    #[test]
    fn schema_covers_every_entry_type() {
        let schema = serde_json::to_string(&schemars::schema_for!(Draft)).unwrap();
        for entry_type in ["Event", "Trip", "Report"] {
            assert!(schema.contains(entry_type), "missing {entry_type}");
        }
        assert!(schema.contains("SubImages"));
    }
}
