//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{any, get},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tubely_core::{
    constants::{MAX_THUMBNAIL_SIZE, THUMBNAIL_ROUTE_PREFIX},
    Config,
};

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 1 << 20;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(thumbnail_routes())
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Upload and retrieval share one path. GET retrieves; every other verb is
/// handed to the upload handler, which rejects non-POST verbs after auth.
fn thumbnail_routes() -> Router<Arc<AppState>> {
    let thumbnail = get(handlers::thumbnail_get::get_thumbnail)
        .post(handlers::thumbnail_upload::upload_thumbnail)
        .fallback(handlers::thumbnail_upload::upload_thumbnail)
        .layer(DefaultBodyLimit::max(
            MAX_THUMBNAIL_SIZE + MULTIPART_OVERHEAD_BYTES,
        ));

    let missing_id = any(handlers::thumbnail_upload::missing_video_id);

    Router::new()
        .route(&format!("{}/{{video_id}}", THUMBNAIL_ROUTE_PREFIX), thumbnail)
        .route(THUMBNAIL_ROUTE_PREFIX, missing_id.clone())
        .route(&format!("{}/", THUMBNAIL_ROUTE_PREFIX), missing_id)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins()
            .iter()
            .map(|o| o.parse())
            .collect::<Result<_, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
