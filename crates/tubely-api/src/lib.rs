//! Tubely API Library
//!
//! This crate provides the HTTP handlers, authentication, and application setup
//! for the thumbnail service.

// Module declarations
mod api_doc;
mod handlers;
pub mod setup;
pub mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
