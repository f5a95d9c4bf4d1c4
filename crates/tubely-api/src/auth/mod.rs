//! Bearer token authentication
//!
//! Requests carry `Authorization: Bearer <jwt>`. The token is an HS256 JWT whose
//! `sub` claim is the user ID; issuance happens elsewhere.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::JwtService;
pub use middleware::resolve_bearer_token;
pub use models::{AuthUser, JwtClaims};
