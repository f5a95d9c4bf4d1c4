#[cfg(feature = "storage-local")]
use crate::LocalThumbnailStore;
use crate::{InMemoryThumbnailStore, StorageBackend, ThumbnailStore};
#[cfg(feature = "storage-local")]
use crate::StorageError;
use crate::StorageResult;
use std::sync::Arc;
use tubely_core::Config;

/// Create a thumbnail store based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn ThumbnailStore>> {
    match config.storage_backend() {
        StorageBackend::Memory => Ok(Arc::new(InMemoryThumbnailStore::new())),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;

            let storage = LocalThumbnailStore::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(crate::StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
