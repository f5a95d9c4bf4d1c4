//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{create_storage, ThumbnailStore};

/// Setup the thumbnail store selected by `STORAGE_BACKEND`
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ThumbnailStore>> {
    tracing::info!("Initializing thumbnail storage...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        "Thumbnail storage initialized successfully"
    );
    Ok(storage)
}
