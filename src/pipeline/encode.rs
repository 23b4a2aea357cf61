//! Image intake: uploaded bytes → base64 attachment for the vision model.
//!
//! Vision APIs take images as base64 payloads with a MIME type. The browser's
//! declared content type is used when it names an image; otherwise the type
//! is sniffed from magic bytes. Images are never decoded here: they are
//! opaque to everything except the model.

use crate::config::AnalysisConfig;
use crate::error::ClearCueError;
use crate::record::Mode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One image as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    /// Content type declared by the client, if any.
    pub declared_mime: Option<String>,
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>, declared_mime: Option<String>) -> Self {
        Self {
            bytes,
            declared_mime,
        }
    }
}

/// Base64 image ready to accompany a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub data: String,
    pub mime_type: String,
}

/// How many images a request in `mode` may forward.
///
/// Skincare plans look at a single face photo; diagnosis takes up to
/// `config.max_images` close-ups.
pub fn image_budget(mode: Mode, config: &AnalysisConfig) -> usize {
    match mode {
        Mode::Diagnosis => config.max_images,
        Mode::SkincarePlan => 1,
    }
}

/// Encode the uploads for `mode`, keeping at most [`image_budget`] of them
/// in upload order.
pub fn encode_uploads(
    uploads: &[UploadedImage],
    mode: Mode,
    config: &AnalysisConfig,
) -> Result<Vec<ImageAttachment>, ClearCueError> {
    let budget = image_budget(mode, config);
    if uploads.len() > budget {
        debug!(
            %mode,
            received = uploads.len(),
            budget,
            "ignoring images beyond the per-mode budget"
        );
    }
    uploads
        .iter()
        .take(budget)
        .map(|upload| encode_upload(upload, config.max_image_bytes))
        .collect()
}

/// Encode one upload, rejecting empty, oversized and non-image payloads.
pub fn encode_upload(
    upload: &UploadedImage,
    max_bytes: usize,
) -> Result<ImageAttachment, ClearCueError> {
    if upload.bytes.is_empty() {
        return Err(ClearCueError::InvalidRequest("uploaded image is empty".into()));
    }
    if upload.bytes.len() > max_bytes {
        return Err(ClearCueError::InvalidRequest(format!(
            "uploaded image is {} bytes; the limit is {} bytes",
            upload.bytes.len(),
            max_bytes
        )));
    }

    let mime_type = resolve_mime(upload)?;
    let data = STANDARD.encode(&upload.bytes);
    debug!(%mime_type, "Encoded image → {} bytes base64", data.len());

    Ok(ImageAttachment { data, mime_type })
}

fn resolve_mime(upload: &UploadedImage) -> Result<String, ClearCueError> {
    if let Some(declared) = upload
        .declared_mime
        .as_deref()
        .filter(|m| m.starts_with("image/"))
    {
        return Ok(declared.to_string());
    }
    image::guess_format(&upload.bytes)
        .map(|format| format.to_mime_type().to_string())
        .map_err(|_| {
            ClearCueError::InvalidRequest("uploaded file is not a recognised image".into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([200, 120, 90, 255])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .expect("encode png");
        buf
    }

    #[test]
    fn sniffs_png_when_undeclared() {
        let upload = UploadedImage::new(png_bytes(), Some("application/octet-stream".into()));
        let data = encode_upload(&upload, 1024 * 1024).expect("encode should succeed");
        assert_eq!(data.mime_type, "image/png");
        let decoded = STANDARD.decode(&data.data).expect("valid base64");
        assert_eq!(decoded, upload.bytes);
    }

    #[test]
    fn declared_image_type_wins() {
        let upload = UploadedImage::new(png_bytes(), Some("image/webp".into()));
        let data = encode_upload(&upload, 1024 * 1024).unwrap();
        assert_eq!(data.mime_type, "image/webp");
    }

    #[test]
    fn rejects_non_images() {
        let upload = UploadedImage::new(b"%PDF-1.7 not an image".to_vec(), None);
        let err = encode_upload(&upload, 1024).unwrap_err();
        assert!(matches!(err, ClearCueError::InvalidRequest(_)));
    }

    #[test]
    fn rejects_empty_and_oversized() {
        let empty = UploadedImage::new(Vec::new(), Some("image/png".into()));
        assert!(encode_upload(&empty, 10).is_err());
        let big = UploadedImage::new(vec![0u8; 11], Some("image/png".into()));
        assert!(encode_upload(&big, 10).is_err());
    }

    #[test]
    fn skincare_keeps_only_first_image() {
        let uploads = vec![
            UploadedImage::new(png_bytes(), None),
            UploadedImage::new(png_bytes(), None),
        ];
        let config = AnalysisConfig::default();
        let skincare = encode_uploads(&uploads, Mode::SkincarePlan, &config).unwrap();
        assert_eq!(skincare.len(), 1);
        let diagnosis = encode_uploads(&uploads, Mode::Diagnosis, &config).unwrap();
        assert_eq!(diagnosis.len(), 2);
    }
}
