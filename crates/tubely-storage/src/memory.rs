use crate::traits::{StorageResult, ThumbnailStore};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tubely_core::models::Thumbnail;

/// Process-local thumbnail store
///
/// Contents are lost when the process exits. Also used as the test double for
/// handler tests.
#[derive(Default)]
pub struct InMemoryThumbnailStore {
    entries: RwLock<HashMap<String, Thumbnail>>,
}

impl InMemoryThumbnailStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored thumbnails
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ThumbnailStore for InMemoryThumbnailStore {
    async fn put(&self, key: &str, thumbnail: Thumbnail) -> StorageResult<()> {
        let size = thumbnail.len();
        self.entries.write().await.insert(key.to_string(), thumbnail);

        tracing::debug!(key = %key, size_bytes = size, "Thumbnail stored in memory");
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Thumbnail>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
