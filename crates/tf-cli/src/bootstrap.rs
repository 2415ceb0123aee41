use anyhow::Context;
use tf_config::TrailConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, picking up `.env` files on the way.
///
/// A `.env` beside an explicit `--config` file is read first; the working
/// directory's `.env` is read by [`TrailConfig::load_with_dotenv`]. Values
/// already set in the environment are never overwritten.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TrailConfig> {
    if let Some(env_path) = flags
        .config
        .as_deref()
        .and_then(std::path::Path::parent)
        .map(|dir| dir.join(".env"))
        .filter(|path| path.is_file())
    {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    let config = TrailConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load trailfinder configuration")?;
    tracing::debug!(
        bucket = %config.store.bucket_name,
        output = %config.output.root.display(),
        "configuration loaded"
    );
    Ok(config)
}
