//! Tubely Database Layer
//!
//! This crate provides the video repository used by the thumbnail service,
//! backed by Postgres or by an in-process map.
//!
// Module declarations
pub mod db;

// Re-exports: video repositories
pub use db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
