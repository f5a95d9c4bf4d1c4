use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tubely_core::{
    models::{Video, VideoId},
    AppError,
};

/// Video record access needed by the thumbnail handlers
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Get video by ID, `None` when it does not exist
    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>, AppError>;

    /// Persist every mutable column of an existing video.
    /// Fails with `AppError::NotFound` when the row is gone.
    async fn update_video(&self, video: &Video) -> Result<(), AppError>;
}

/// Repository for videos stored in Postgres
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(
            "SELECT id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at FROM videos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(&video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Video {} not found", video.id)));
        }

        Ok(())
    }
}

/// Process-local video repository
///
/// Used when no database is configured and as the test double for handler
/// tests.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<VideoId, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a video, replacing any record with the same ID
    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id.clone(), video);
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let mut videos = self.videos.write().await;
        match videos.get_mut(&video.id) {
            Some(existing) => {
                *existing = video.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Video {} not found", video.id))),
        }
    }
}
