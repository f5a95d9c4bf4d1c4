use crate::keys::validate_key;
use crate::traits::{StorageError, StorageResult, ThumbnailStore};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tubely_core::models::Thumbnail;

const DATA_EXTENSION: &str = "bin";
const MEDIA_TYPE_EXTENSION: &str = "type";

/// Append `.{ext}` to a path without touching dots already in the file name.
fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Local filesystem thumbnail store
///
/// Each thumbnail is written as `<base>/<key>.bin` with its declared media type
/// in the sidecar `<base>/<key>.type`. Both files are staged and renamed into
/// place while holding the write lock, so readers in this process see either
/// the old pair or the new one.
pub struct LocalThumbnailStore {
    base_path: PathBuf,
    lock: RwLock<()>,
}

impl LocalThumbnailStore {
    /// Create a new LocalThumbnailStore instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for thumbnail files (e.g., "/var/lib/tubely")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalThumbnailStore {
            base_path,
            lock: RwLock::new(()),
        })
    }

    /// Convert storage key to the pair of (data, media type) paths
    fn key_to_paths(&self, key: &str) -> StorageResult<(PathBuf, PathBuf)> {
        validate_key(key)?;

        let path = self.base_path.join(key);
        if path.strip_prefix(&self.base_path).is_err() {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside storage directory".to_string(),
            ));
        }

        Ok((
            with_suffix(&path, DATA_EXTENSION),
            with_suffix(&path, MEDIA_TYPE_EXTENSION),
        ))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_staged(path: &Path, contents: &[u8]) -> StorageResult<PathBuf> {
        let staged = with_suffix(path, "tmp");

        let mut file = fs::File::create(&staged).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", staged.display(), e))
        })?;

        file.write_all(contents).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", staged.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", staged.display(), e))
        })?;

        Ok(staged)
    }
}

#[async_trait]
impl ThumbnailStore for LocalThumbnailStore {
    async fn put(&self, key: &str, thumbnail: Thumbnail) -> StorageResult<()> {
        let (data_path, type_path) = self.key_to_paths(key)?;
        let size = thumbnail.len();

        self.ensure_parent_dir(&data_path).await?;

        let start = std::time::Instant::now();

        // Staging paths are shared per key, so concurrent puts are serialized.
        {
            let _guard = self.lock.write().await;
            let staged_data = Self::write_staged(&data_path, &thumbnail.data).await?;
            let staged_type =
                Self::write_staged(&type_path, thumbnail.media_type.as_bytes()).await?;
            fs::rename(&staged_data, &data_path).await?;
            fs::rename(&staged_type, &type_path).await?;
        }

        tracing::info!(
            path = %data_path.display(),
            key = %key,
            size_bytes = size,
            content_type = %thumbnail.media_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Thumbnail>> {
        let (data_path, type_path) = self.key_to_paths(key)?;

        let _guard = self.lock.read().await;

        let data = match fs::read(&data_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read file {}: {}",
                    data_path.display(),
                    e
                )))
            }
        };

        let media_type = fs::read_to_string(&type_path).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to read media type {}: {}",
                type_path.display(),
                e
            ))
        })?;

        tracing::debug!(
            path = %data_path.display(),
            key = %key,
            size_bytes = data.len(),
            "Local storage download successful"
        );

        Ok(Some(Thumbnail::new(Bytes::from(data), media_type)))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let (data_path, _) = self.key_to_paths(key)?;
        Ok(fs::try_exists(&data_path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
