use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request, State},
    http::Method,
    Json,
};
use tubely_core::{
    constants::MAX_THUMBNAIL_SIZE,
    models::{VideoId, VideoResponse},
    AppError,
};
use tubely_storage::thumbnail_key;

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_thumbnail_field, validate_upload};

/// Upload thumbnail handler
///
/// Replaces the thumbnail of a video owned by the caller and points the video's
/// `thumbnailURL` at the retrieval route. Every verb except GET lands here so
/// that a wrong verb is only reported to authenticated callers.
///
/// Checks run in order and the first failure wins: identifier, bearer token,
/// verb, video existence, ownership, form field, size, media type.
///
/// # Errors
/// - `AppError::InvalidIdentifier` - Blank video ID
/// - `AppError::Unauthorized` - Missing or invalid bearer token
/// - `AppError::MethodNotAllowed` - Verb other than POST
/// - `AppError::NotFound` - Unknown video
/// - `AppError::Forbidden` - Caller does not own the video
/// - `AppError::InvalidInput` - Missing, oversized or non-image thumbnail
#[utoipa::path(
    post,
    path = "/upload/thumbnails/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form with a `thumbnail` file part"),
    responses(
        (status = 200, description = "Thumbnail stored, updated video returned", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Not the owner of the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(
        method = %request.method(),
        user_id = tracing::field::Empty,
        size_bytes = tracing::field::Empty,
        content_type = tracing::field::Empty,
        operation = "upload_thumbnail"
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    request: Request,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = VideoId::parse(&video_id)?;

    let (mut parts, body) = request.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &state).await?;
    tracing::Span::current().record("user_id", user.user_id.as_str());

    if parts.method != Method::POST {
        return Err(AppError::MethodNotAllowed(format!(
            "{} is not supported, use POST",
            parts.method
        ))
        .into());
    }

    let mut video = state
        .videos
        .get_video(&video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(&user.user_id) {
        return Err(AppError::Forbidden(
            "You are not the owner of this video".to_string(),
        )
        .into());
    }

    let multipart = Multipart::from_request(Request::from_parts(parts, body), &state)
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart form: {}", e)))?;
    let thumbnail = validate_upload(extract_thumbnail_field(multipart, MAX_THUMBNAIL_SIZE).await?)?;

    let span = tracing::Span::current();
    span.record("size_bytes", thumbnail.len());
    span.record("content_type", thumbnail.media_type.as_str());

    // Not transactional: if the video update fails the new bytes stay stored
    // and the record keeps its previous URL. A retry converges.
    state
        .thumbnails
        .put(&thumbnail_key(&video_id), thumbnail)
        .await?;

    video.set_thumbnail_url(state.config.thumbnail_url(&video_id));
    state.videos.update_video(&video).await?;

    tracing::info!(video_id = %video_id, "Thumbnail uploaded");

    Ok(Json(VideoResponse::from(video)))
}

/// Requests to the thumbnail routes without a video ID
pub async fn missing_video_id() -> HttpAppError {
    AppError::InvalidIdentifier("Missing video ID".to_string()).into()
}
