//! Local file previews encoded as `data:` URLs.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use image::ImageFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Failed to read preview file: {0}")]
    Read(#[from] std::io::Error),
    #[error("File not found: {0}")]
    NotFound(String),
}

/// Reads `path` and returns `data:<mime>;base64,<contents>`.
pub async fn file_to_data_url(path: &Path) -> Result<String, PreviewError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(PreviewError::NotFound(path.display().to_string()));
    }
    let bytes = tokio::fs::read(path).await?;
    let mime = sniff_mime(&bytes, path);
    Ok(bytes_to_data_url(&bytes, mime))
}

pub fn bytes_to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes))
}

/// MIME type from the file content, then the extension.
pub fn sniff_mime(bytes: &[u8], path: &Path) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .and_then(format_mime)
        .or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(ImageFormat::from_extension)
                .and_then(format_mime)
        })
        .unwrap_or("application/octet-stream")
}

fn format_mime(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        ImageFormat::Tiff => Some("image/tiff"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn png_file_becomes_png_data_url() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("front.png");
        RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .expect("write png");

        let url = file_to_data_url(&path).await.expect("data url");
        assert!(url.starts_with("data:image/png;base64,"), "got {url}");
        let encoded = url.trim_start_matches("data:image/png;base64,");
        let decoded = BASE64_STANDARD.decode(encoded).expect("valid base64");
        assert_eq!(decoded, std::fs::read(&path).unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let result = file_to_data_url(Path::new("/nonexistent/label.jpg")).await;
        assert!(matches!(result, Err(PreviewError::NotFound(_))));
    }

    #[test]
    fn sniff_falls_back_to_extension_then_octet_stream() {
        assert_eq!(sniff_mime(b"not an image", Path::new("x.jpeg")), "image/jpeg");
        assert_eq!(sniff_mime(b"not an image", Path::new("x.txt")), "application/octet-stream");
        assert_eq!(sniff_mime(b"not an image", Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn bytes_to_data_url_encodes_payload() {
        assert_eq!(bytes_to_data_url(b"hi", "text/plain"), "data:text/plain;base64,aGk=");
    }
}
