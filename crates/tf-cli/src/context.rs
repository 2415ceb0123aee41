use tf_config::TrailConfig;
use tf_publish::Publisher;
use tf_store::ObjectStoreUploader;

/// Everything a command needs beyond its own arguments.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: TrailConfig,
}

impl AppContext {
    pub const fn new(config: TrailConfig) -> Self {
        Self { config }
    }

    /// Publisher writing below the configured output root.
    pub fn publisher(&self) -> Publisher {
        Publisher::new(&self.config.output.root)
            .with_default_content_type(&self.config.store.default_content_type)
    }

    /// S3 uploader for the configured bucket. Built on demand so commands
    /// without attachments never need store credentials.
    pub fn uploader(&self) -> anyhow::Result<ObjectStoreUploader> {
        Ok(ObjectStoreUploader::from_config(&self.config.store)?)
    }
}
