//! Tubely Storage Library
//!
//! Thumbnail storage abstraction plus its in-memory and local filesystem
//! backends.
//!
//! # Storage key format
//!
//! Every thumbnail lives under `thumbnails/{video_id}`. Keys must not be empty,
//! contain `..` or start with `/`. Key generation is centralized in the `keys`
//! module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{thumbnail_key, validate_key};
#[cfg(feature = "storage-local")]
pub use local::LocalThumbnailStore;
pub use memory::InMemoryThumbnailStore;
pub use traits::{StorageError, StorageResult, ThumbnailStore};
pub use tubely_core::StorageBackend;
