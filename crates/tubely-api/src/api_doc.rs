//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tubely_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely Thumbnail API",
        version = "0.1.0",
        description = "Upload and serve video thumbnails. Uploads require `Authorization: Bearer <jwt>` and ownership of the video; retrieval is public."
    ),
    paths(
        // Thumbnails
        handlers::thumbnail_upload::upload_thumbnail,
        handlers::thumbnail_get::get_thumbnail,
        // Health
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::VideoResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "thumbnails", description = "Thumbnail upload and retrieval"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_thumbnail_route() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/upload/thumbnails/{video_id}"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
