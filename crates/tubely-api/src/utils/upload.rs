//! Thumbnail form decoding and validation
//!
//! The multipart body is decoded once into a [`ParsedUpload`], which
//! [`validate_upload`] then matches exhaustively. Checks run in a fixed order:
//! presence, file-ness, size, declared media type.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use tubely_core::constants::{IMAGE_MEDIA_TYPE_PREFIX, MAX_THUMBNAIL_SIZE, THUMBNAIL_FIELD};
use tubely_core::models::Thumbnail;
use tubely_core::AppError;

const SIZE_LIMIT_MESSAGE: &str = "thumbnail exceeds size limit";

/// Outcome of reading the `thumbnail` field from a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedUpload {
    /// A file part, read completely and within the size ceiling
    File {
        data: Bytes,
        content_type: Option<String>,
        file_name: String,
    },
    /// A file part whose payload passed the size ceiling; reading stopped early
    Oversized,
    /// No field named `thumbnail`
    Missing,
    /// A `thumbnail` field without a filename, i.e. a plain form value
    NotAFile,
}

/// Map a multipart read failure. Hitting the transport body limit is reported
/// as an oversized thumbnail rather than a malformed form.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::InvalidInput(SIZE_LIMIT_MESSAGE.to_string());
    }
    AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
}

/// Find the `thumbnail` field and read it chunk by chunk, giving up as soon as
/// more than `max_size` bytes have arrived. Other fields are skipped.
pub async fn extract_thumbnail_field(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<ParsedUpload, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().map(|s: &str| s.to_string()) else {
            return Ok(ParsedUpload::NotAFile);
        };
        let content_type = field.content_type().map(|s: &str| s.to_string());

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if buffer.len() + chunk.len() > max_size {
                return Ok(ParsedUpload::Oversized);
            }
            buffer.extend_from_slice(&chunk);
        }

        return Ok(ParsedUpload::File {
            data: buffer.freeze(),
            content_type,
            file_name,
        });
    }

    Ok(ParsedUpload::Missing)
}

/// Declared type must start with `image/`. A missing type counts as non-image.
pub fn validate_media_type(content_type: Option<&str>) -> Result<String, AppError> {
    match content_type {
        Some(ct) if ct.trim().to_lowercase().starts_with(IMAGE_MEDIA_TYPE_PREFIX) => {
            Ok(ct.trim().to_string())
        }
        _ => Err(AppError::InvalidInput(
            "thumbnail must be an image".to_string(),
        )),
    }
}

/// Turn a decoded form into a storable thumbnail or the first failing check
pub fn validate_upload(upload: ParsedUpload) -> Result<Thumbnail, AppError> {
    match upload {
        ParsedUpload::Missing => Err(AppError::InvalidInput("missing thumbnail".to_string())),
        ParsedUpload::NotAFile => Err(AppError::InvalidInput(
            "thumbnail must be a file".to_string(),
        )),
        ParsedUpload::Oversized => Err(AppError::InvalidInput(SIZE_LIMIT_MESSAGE.to_string())),
        ParsedUpload::File {
            data, content_type, ..
        } => {
            if data.len() > MAX_THUMBNAIL_SIZE {
                return Err(AppError::InvalidInput(SIZE_LIMIT_MESSAGE.to_string()));
            }
            let media_type = validate_media_type(content_type.as_deref())?;
            Ok(Thumbnail::new(data, media_type))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(len: usize, content_type: Option<&str>) -> ParsedUpload {
        ParsedUpload::File {
            data: Bytes::from(vec![0u8; len]),
            content_type: content_type.map(String::from),
            file_name: "thumb.png".to_string(),
        }
    }

    fn message(result: Result<Thumbnail, AppError>) -> String {
        match result {
            Err(AppError::InvalidInput(msg)) => msg,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_image_within_limit() {
        let thumb = validate_upload(file(1024, Some("image/png"))).unwrap();
        assert_eq!(thumb.len(), 1024);
        assert_eq!(thumb.media_type, "image/png");
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_upload(file(MAX_THUMBNAIL_SIZE, Some("image/jpeg"))).is_ok());
        assert_eq!(
            message(validate_upload(file(MAX_THUMBNAIL_SIZE + 1, Some("image/jpeg")))),
            "thumbnail exceeds size limit"
        );
    }

    #[test]
    fn test_empty_image_accepted() {
        let thumb = validate_upload(file(0, Some("image/gif"))).unwrap();
        assert!(thumb.is_empty());
    }

    #[test]
    fn test_non_image_rejected() {
        assert_eq!(
            message(validate_upload(file(10, Some("application/pdf")))),
            "thumbnail must be an image"
        );
        assert_eq!(
            message(validate_upload(file(10, None))),
            "thumbnail must be an image"
        );
    }

    #[test]
    fn test_size_checked_before_type() {
        assert_eq!(
            message(validate_upload(ParsedUpload::Oversized)),
            "thumbnail exceeds size limit"
        );
    }

    #[test]
    fn test_missing_and_wrong_kind() {
        assert_eq!(
            message(validate_upload(ParsedUpload::Missing)),
            "missing thumbnail"
        );
        assert_eq!(
            message(validate_upload(ParsedUpload::NotAFile)),
            "thumbnail must be a file"
        );
    }

    #[test]
    fn test_media_type_parameters_kept() {
        assert_eq!(
            validate_media_type(Some("image/svg+xml; charset=utf-8")).unwrap(),
            "image/svg+xml; charset=utf-8"
        );
        assert!(validate_media_type(Some("images/png")).is_err());
        assert!(validate_media_type(Some("text/image/png")).is_err());
    }
}
