//! Service-wide constants.

/// Largest accepted thumbnail payload, inclusive: 10 MiB.
pub const MAX_THUMBNAIL_SIZE: usize = 10 << 20;

/// Multipart form field that carries the thumbnail file.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Path prefix shared by the thumbnail upload and retrieval routes.
pub const THUMBNAIL_ROUTE_PREFIX: &str = "/upload/thumbnails";

/// Issuer claim required on access tokens.
pub const TOKEN_ISSUER: &str = "tubely-access";

/// Prefix a declared media type must carry to be accepted as a thumbnail.
pub const IMAGE_MEDIA_TYPE_PREFIX: &str = "image/";
