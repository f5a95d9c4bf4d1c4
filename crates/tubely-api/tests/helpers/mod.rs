//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p tubely-api --test thumbnails_test`.
//! Collaborators are in-memory, so no database or Docker is needed.

pub mod auth;
pub mod fixtures;

use axum_test::TestServer;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tubely_api::setup::routes;
use tubely_api::state::AppState;
use tubely_core::models::{Video, VideoId};
use tubely_core::Config;
use tubely_db::InMemoryVideoRepository;
use tubely_storage::{InMemoryThumbnailStore, LocalThumbnailStore, ThumbnailStore};

/// Test application: server plus handles on the in-memory collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub videos: Arc<InMemoryVideoRepository>,
    pub thumbnails: Arc<InMemoryThumbnailStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Seed a video owned by `owner`.
    pub async fn seed_video(&self, id: &str, owner: &str) -> Video {
        let video = Video::new(VideoId::parse(id).unwrap(), owner, "Boots demo");
        self.videos.insert(video.clone()).await;
        video
    }
}

pub fn create_test_config() -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("JWT_SECRET", auth::TEST_JWT_SECRET.to_string()),
        ("PORT", "8091".to_string()),
        ("PUBLIC_HOST", "localhost".to_string()),
    ]);
    let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("test config");
    config.validate().expect("valid test config");
    config
}

fn build_server(videos: Arc<InMemoryVideoRepository>, store: Arc<dyn ThumbnailStore>) -> TestServer {
    let config = create_test_config();
    let state = Arc::new(AppState::new(config.clone(), videos, store));
    let app = routes::setup_routes(&config, state).expect("Failed to build router");

    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// Setup test app with in-memory videos and thumbnails.
pub async fn setup_test_app() -> TestApp {
    let videos = Arc::new(InMemoryVideoRepository::new());
    let thumbnails = Arc::new(InMemoryThumbnailStore::new());

    let server = build_server(videos.clone(), thumbnails.clone());

    TestApp {
        server,
        videos,
        thumbnails,
    }
}

/// Setup test app whose thumbnails live on disk under `root`.
pub async fn setup_local_test_app(root: &Path) -> (TestServer, Arc<InMemoryVideoRepository>) {
    let videos = Arc::new(InMemoryVideoRepository::new());
    let store = LocalThumbnailStore::new(root)
        .await
        .expect("Failed to open local store");

    (build_server(videos.clone(), Arc::new(store)), videos)
}
