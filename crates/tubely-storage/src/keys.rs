//! Shared key generation for storage backends.
//!
//! Key format: `thumbnails/{encoded_video_id}`, where the id is percent-encoded
//! into a single segment made only of ASCII alphanumerics, `-`, `_` and `%`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tubely_core::models::VideoId;

use crate::traits::{StorageError, StorageResult};

const THUMBNAIL_KEY_PREFIX: &str = "thumbnails";

/// Everything except `-` and `_` is escaped, so no id can form a dot segment
/// or a separator on any filesystem.
const KEY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Storage key of the thumbnail belonging to `video_id`.
///
/// Distinct ids always map to distinct keys.
pub fn thumbnail_key(video_id: &VideoId) -> String {
    format!(
        "{}/{}",
        THUMBNAIL_KEY_PREFIX,
        utf8_percent_encode(video_id.as_str(), KEY_SEGMENT)
    )
}

/// Reject keys that could escape a filesystem-backed storage root.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key must be a relative path".to_string(),
        ));
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains an empty or dot segment".to_string(),
        ));
    }
    Ok(())
}
