//! Application state shared by every handler.
//!
//! Collaborators are held as trait objects so the same router serves Postgres
//! or in-memory videos and any thumbnail store backend.

use crate::auth::JwtService;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_storage::ThumbnailStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    pub thumbnails: Arc<dyn ThumbnailStore>,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(
        config: Config,
        videos: Arc<dyn VideoRepository>,
        thumbnails: Arc<dyn ThumbnailStore>,
    ) -> Self {
        let jwt = JwtService::new(config.jwt_secret());
        Self {
            config,
            videos,
            thumbnails,
            jwt,
        }
    }
}
