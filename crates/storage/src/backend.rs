use std::path::{Path, PathBuf};
use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use tracing::info;

use docrag_core::config::StorageConfig;

use crate::error::StorageError;

/// Unified storage backend wrapping object_store.
pub enum StorageBackend {
    Local(LocalBackend),
    S3(S3Backend),
    /// Process-local store, used by tests and offline tooling.
    Memory(Arc<InMemory>),
}

impl StorageBackend {
    /// Select S3 or local filesystem according to `STORAGE_BACKEND`.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if config.is_s3() {
            Ok(StorageBackend::S3(S3Backend::new(config)?))
        } else {
            Ok(StorageBackend::Local(LocalBackend::new(&config.data_dir)?))
        }
    }

    pub fn memory() -> Self {
        StorageBackend::Memory(Arc::new(InMemory::new()))
    }

    /// Get an Arc-wrapped ObjectStore.
    pub fn store_arc(&self) -> Arc<dyn ObjectStore> {
        match self {
            StorageBackend::Local(b) => b.store.clone(),
            StorageBackend::S3(b) => b.store.clone(),
            StorageBackend::Memory(m) => m.clone(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, StorageBackend::S3(_))
    }

    /// Human-readable location for logs, e.g. `s3://bucket` or a local path.
    pub fn describe(&self) -> String {
        match self {
            StorageBackend::Local(b) => b.root.display().to_string(),
            StorageBackend::S3(b) => format!("s3://{}", b.bucket),
            StorageBackend::Memory(_) => "memory://".to_string(),
        }
    }
}

/// Local filesystem backend.
pub struct LocalBackend {
    pub store: Arc<dyn ObjectStore>,
    pub root: PathBuf,
}

impl LocalBackend {
    pub fn new(data_dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(data_dir)?;
        let canonical = std::fs::canonicalize(data_dir)?;
        let store = LocalFileSystem::new_with_prefix(&canonical)?;
        info!("Storage: local backend at {}", canonical.display());
        Ok(Self {
            store: Arc::new(store),
            root: canonical,
        })
    }
}

/// S3 backend.
pub struct S3Backend {
    pub store: Arc<dyn ObjectStore>,
    pub bucket: String,
}

impl S3Backend {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let bucket = config.s3_bucket.as_str();
        if bucket.is_empty() {
            return Err(StorageError::NotConfigured("S3_BUCKET not set".into()));
        }

        // Environment first so the usual AWS credential chain still applies
        // when no explicit keys are configured.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(&config.region)
            .with_bucket_name(bucket);

        if let Some(ref key) = config.access_key_id {
            builder = builder.with_access_key_id(key);
        }
        if let Some(ref secret) = config.secret_access_key {
            builder = builder.with_secret_access_key(secret);
        }
        if let Some(ref token) = config.session_token {
            builder = builder.with_token(token);
        }

        if let Some(ref endpoint) = config.endpoint_url {
            // object_store requires absolute URLs
            let endpoint_url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
                endpoint.clone()
            } else {
                format!("https://{}", endpoint)
            };
            builder = builder
                .with_endpoint(&endpoint_url)
                .with_allow_http(endpoint_url.starts_with("http://"));
        }

        let store = builder.build()?;

        info!("Storage: S3 backend s3://{} (region: {})", bucket, config.region);

        Ok(Self {
            store: Arc::new(store),
            bucket: bucket.to_string(),
        })
    }
}
