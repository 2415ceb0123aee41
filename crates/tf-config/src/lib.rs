//! # tf-config
//!
//! Layered configuration loading for the trailfinder publisher using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TRAILFINDER_*` prefix, `__` as separator)
//! 2. An explicit config file passed by the caller (`tfp --config`)
//! 3. Project-level `trailfinder.toml` in the working directory
//! 4. User-level `~/.config/trailfinder/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TRAILFINDER_STORE__BUCKET_NAME` -> `store.bucket_name`,
//! `TRAILFINDER_OUTPUT__ROOT` -> `output.root`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tf_config::TrailConfig;
//!
//! let config = TrailConfig::load_with_dotenv(None).expect("config");
//! println!("uploading to {}", config.store.public_base());
//! ```

mod error;
mod output;
mod store;

pub use error::ConfigError;
pub use output::OutputConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project-level config.
pub const PROJECT_CONFIG_FILE: &str = "trailfinder.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrailConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl TrailConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or the explicit
    /// `config_file` does not exist.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigError::InvalidValue {
                    field: String::from("config"),
                    reason: format!("{} is not a file", path.display()),
                });
            }
        }
        Self::figment(config_file)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building
    /// the figment, so `TRAILFINDER_*` and `AWS_*` values in it apply.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_file)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("TRAILFINDER_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trailfinder").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = TrailConfig::default();
        assert!(config.store.is_configured());
        assert_eq!(config.output.root, PathBuf::from("output"));
    }

    #[test]
    fn figment_builds_without_files() {
        let config: TrailConfig = TrailConfig::figment(None)
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.store.region, "us-east-1");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = TrailConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
