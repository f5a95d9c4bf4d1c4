//! Database repositories for data access layer
//!
//! Each repository is responsible for a specific domain entity. The thumbnail
//! service only needs the video record: read it, and persist it back once its
//! thumbnail URL changed.
//
// Video repositories
pub mod video;

pub use video::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
