//! Storage abstraction trait
//!
//! This module defines the ThumbnailStore trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;
use tubely_core::models::Thumbnail;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-addressed thumbnail store
///
/// At most one thumbnail exists per key. A `put` replaces whatever was stored
/// before, payload and media type together, and readers never observe a mix of
/// the two. See the crate root documentation for the key layout.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Store a thumbnail, overwriting any previous one under the same key
    async fn put(&self, key: &str, thumbnail: Thumbnail) -> StorageResult<()>;

    /// Fetch the thumbnail stored under `key`, `None` when absent
    async fn get(&self, key: &str) -> StorageResult<Option<Thumbnail>>;

    /// Check if a thumbnail exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
