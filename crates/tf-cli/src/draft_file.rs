//! Reading and writing draft files.

use std::path::Path;

use anyhow::Context;
use tf_core::Draft;

pub fn load(path: &Path) -> anyhow::Result<Draft> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read draft {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("invalid draft {}", path.display()))
}

/// Write `draft` as indented JSON, creating parent directories as needed.
pub fn save(path: &Path, draft: &Draft) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut bytes = serde_json::to_vec_pretty(draft).context("failed to serialize draft")?;
    bytes.push(b'\n');
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write draft {}", path.display()))?;
    tracing::debug!(path = %path.display(), entry_type = %draft.entry_type(), "saved draft");
    Ok(())
}
