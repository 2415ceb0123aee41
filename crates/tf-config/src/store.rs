//! Remote image store configuration (S3-compatible).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_bucket_name() -> String {
    String::from("hikes-trailfinder-website-images")
}

fn default_region() -> String {
    String::from("us-east-1")
}

fn default_content_type() -> String {
    String::from("image/webp")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Bucket receiving uploaded images.
    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom S3 endpoint (e.g. a local MinIO). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    /// Access key ID. Empty falls back to the `AWS_*` environment.
    #[serde(default)]
    pub access_key_id: String,

    /// Secret access key. Empty falls back to the `AWS_*` environment.
    #[serde(default)]
    pub secret_access_key: String,

    /// Base of the public URLs handed back after upload. If empty, built
    /// from bucket and region.
    #[serde(default)]
    pub public_base_url: String,

    /// Content type for files whose extension is not recognized.
    #[serde(default = "default_content_type")]
    pub default_content_type: String,

    /// Permit plain-HTTP endpoints.
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket_name: default_bucket_name(),
            region: default_region(),
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            public_base_url: String::new(),
            default_content_type: default_content_type(),
            allow_http: false,
        }
    }
}

impl StoreConfig {
    /// Check if the store config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.bucket_name.is_empty() && !self.region.is_empty()
    }

    /// Whether explicit credentials are set (otherwise the environment is used).
    pub fn has_static_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }

    /// Fail unless bucket and region are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` naming the `store` section.
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: String::from("store"),
            })
        }
    }

    /// Base of public object URLs, without a trailing slash.
    ///
    /// Returns the custom `public_base_url` if set, otherwise the virtual-hosted
    /// S3 address `https://<bucket>.s3.<region>.amazonaws.com`.
    pub fn public_base(&self) -> String {
        if self.public_base_url.is_empty() {
            format!(
                "https://{}.s3.{}.amazonaws.com",
                self.bucket_name, self.region
            )
        } else {
            self.public_base_url.trim_end_matches('/').to_string()
        }
    }

    /// Public URL of the object stored under `key`.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base(), key)
    }
}
