use axum_test::multipart::{MultipartForm, Part};

/// PNG signature followed by zero padding up to `len` bytes.
pub fn png_bytes(len: usize) -> Vec<u8> {
    const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    let mut data = vec![0u8; len];
    let n = len.min(SIGNATURE.len());
    data[..n].copy_from_slice(&SIGNATURE[..n]);
    data
}

/// Form with a `thumbnail` file part of the given bytes and declared type.
pub fn thumbnail_form(data: Vec<u8>, content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(data)
            .file_name("thumbnail.png")
            .mime_type(content_type),
    )
}
