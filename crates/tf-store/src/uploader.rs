use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use tf_config::StoreConfig;
use tf_core::AttachmentKind;

use crate::error::UploadError;
use crate::keys;

/// A local file bound to the remote key and content type it will be stored
/// under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAsset {
    pub local_path: PathBuf,
    pub remote_key: String,
    pub content_type: String,
}

impl RemoteAsset {
    /// Derive key and content type for an image of entry `unique_id`.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::InvalidKey` if `unique_id` cannot start a key.
    pub fn for_image(
        unique_id: &str,
        kind: AttachmentKind,
        local_path: &Path,
        default_content_type: &str,
    ) -> Result<Self, UploadError> {
        keys::check_unique_id(unique_id)?;
        let ext = keys::extension_of(local_path);
        let remote_key = keys::derive_key(unique_id, kind, &ext);
        tracing::debug!(%remote_key, path = %local_path.display(), "derived upload key");
        Ok(Self {
            local_path: local_path.to_path_buf(),
            content_type: keys::content_type_for(&ext, default_content_type),
            remote_key,
        })
    }
}

/// Pushes one local file to remote storage and returns its retrieval URL.
pub trait BlobUploader {
    /// Read `asset.local_path` fully and store it under `asset.remote_key`,
    /// replacing any existing object.
    fn upload(&self, asset: &RemoteAsset) -> impl Future<Output = Result<String, UploadError>> + Send;
}

/// [`BlobUploader`] over any `object_store` backend.
#[derive(Debug, Clone)]
pub struct ObjectStoreUploader {
    store: Arc<dyn ObjectStore>,
    config: StoreConfig,
}

impl ObjectStoreUploader {
    /// Build an S3 client for the configured bucket.
    ///
    /// Credentials left empty in `config` are taken from the `AWS_*`
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Config` if the configuration is incomplete or
    /// the client cannot be built.
    pub fn from_config(config: &StoreConfig) -> Result<Self, UploadError> {
        config
            .require_configured()
            .map_err(|error| UploadError::Config(error.to_string()))?;

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket_name)
            .with_region(&config.region)
            .with_allow_http(config.allow_http);
        if !config.endpoint.is_empty() {
            builder = builder.with_endpoint(&config.endpoint);
        }
        if config.has_static_credentials() {
            builder = builder
                .with_access_key_id(&config.access_key_id)
                .with_secret_access_key(&config.secret_access_key);
        }

        let store = builder
            .build()
            .map_err(|error| UploadError::Config(error.to_string()))?;
        tracing::debug!(bucket = %config.bucket_name, region = %config.region, "built S3 uploader");
        Ok(Self::with_store(Arc::new(store), config.clone()))
    }

    /// Wrap an existing store; URLs are still computed from `config`.
    #[must_use]
    pub fn with_store(store: Arc<dyn ObjectStore>, config: StoreConfig) -> Self {
        Self { store, config }
    }

    /// Uploader backed by an in-process store.
    #[must_use]
    pub fn in_memory(config: StoreConfig) -> Self {
        Self::with_store(Arc::new(InMemory::new()), config)
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl BlobUploader for ObjectStoreUploader {
    async fn upload(&self, asset: &RemoteAsset) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(&asset.local_path)
            .await
            .map_err(|source| UploadError::Read {
                path: asset.local_path.clone(),
                source,
            })?;

        let location = ObjectPath::parse(&asset.remote_key).map_err(|error| {
            UploadError::InvalidKey {
                key: asset.remote_key.clone(),
                reason: error.to_string(),
            }
        })?;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, asset.content_type.clone().into());
        let options = PutOptions {
            attributes,
            ..PutOptions::default()
        };

        let size = bytes.len();
        self.store
            .put_opts(&location, PutPayload::from(bytes), options)
            .await
            .map_err(|source| UploadError::Store {
                key: asset.remote_key.clone(),
                source,
            })?;

        let url = self.config.public_url(&asset.remote_key);
        tracing::info!(key = %asset.remote_key, size, %url, "uploaded image");
        Ok(url)
    }
}
