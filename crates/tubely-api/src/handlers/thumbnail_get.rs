use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tubely_core::{models::VideoId, AppError};
use tubely_storage::thumbnail_key;

/// Serve the stored thumbnail of a video
///
/// Public: no bearer token is required.
#[utoipa::path(
    get,
    path = "/upload/thumbnails/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes with their declared media type", content_type = "image/*"),
        (status = 400, description = "Missing video ID", body = ErrorResponse),
        (status = 404, description = "Video or thumbnail not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_thumbnail"))]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Response, HttpAppError> {
    let video_id = VideoId::parse(&video_id)?;

    state
        .videos
        .get_video(&video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("video not found".to_string()))?;

    let thumbnail = state
        .thumbnails
        .get(&thumbnail_key(&video_id))
        .await?
        .ok_or_else(|| AppError::NotFound("thumbnail not found".to_string()))?;

    tracing::debug!(
        video_id = %video_id,
        size_bytes = thumbnail.len(),
        content_type = %thumbnail.media_type,
        "Serving thumbnail"
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, thumbnail.media_type)
        .header(header::CONTENT_LENGTH, thumbnail.data.len())
        .body(Body::from(thumbnail.data))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
