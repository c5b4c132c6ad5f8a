//! Object storage for original uploaded files.

pub mod backend;
pub mod error;

use std::sync::Arc;

use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use tracing::info;

use docrag_core::{file_extension, FileId};

pub use backend::{LocalBackend, S3Backend, StorageBackend};
pub use error::StorageError;

/// Key prefix under which every upload is stored.
pub const UPLOAD_PREFIX: &str = "uploads";

/// Object key for an upload: `uploads/<file_id><ext>`, keeping the original
/// extension (dot included) so downloads stay recognisable.
pub fn upload_key(file_id: FileId, filename: &str) -> String {
    format!("{}/{}{}", UPLOAD_PREFIX, file_id, file_extension(filename))
}

/// Stores and removes original upload bytes.
#[derive(Clone)]
pub struct UploadStore {
    store: Arc<dyn ObjectStore>,
    location: String,
}

impl UploadStore {
    pub fn new(backend: &StorageBackend) -> Self {
        Self {
            store: backend.store_arc(),
            location: backend.describe(),
        }
    }

    /// Build the backend selected by config.
    pub fn from_config(config: &docrag_core::config::StorageConfig) -> Result<Self, StorageError> {
        Ok(Self::new(&StorageBackend::from_config(config)?))
    }

    pub fn in_memory() -> Self {
        Self::new(&StorageBackend::memory())
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub async fn put(&self, key: &str, bytes: Bytes) -> Result<(), StorageError> {
        let size = bytes.len();
        self.store.put(&ObjectPath::from(key), bytes.into()).await?;
        info!("Stored {} bytes at {}/{}", size, self.location, key);
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        let result = self.store.get(&ObjectPath::from(key)).await?;
        Ok(result.bytes().await?)
    }

    /// Delete an object. A missing object is not an error.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match self.store.delete(&ObjectPath::from(key)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
