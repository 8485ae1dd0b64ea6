//! Cover image handling
//!
//! Picked image files are decoded, cropped to a square, resized and
//! re-encoded as PNG so the catalog stores one small blob per book.

use image::{imageops::FilterType, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::info;

use crate::error::AppResult;

/// Default edge length of stored covers (square)
pub const DEFAULT_COVER_SIZE: u32 = 256;

/// File extensions offered in the cover picker
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Decode the image at `path` and turn it into cover PNG bytes
pub fn load_cover(path: &Path, size: u32) -> AppResult<Vec<u8>> {
    let img = image::open(path)?;
    encode_cover(&img, size)
}

/// Centre-crop to a square, resize to `size` and encode as PNG
pub fn encode_cover(img: &image::DynamicImage, size: u32) -> AppResult<Vec<u8>> {
    let size = size.max(1);
    let cover = img.resize_to_fill(size, size, FilterType::Lanczos3);

    let mut bytes = Vec::new();
    cover.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Load a cover off the UI thread
///
/// Errors come back as strings so the result can travel inside a GUI message.
pub async fn load_cover_async(path: PathBuf, size: u32) -> Result<Vec<u8>, String> {
    // Spawn blocking because decoding and Lanczos resizing are CPU-intensive
    task::spawn_blocking(move || -> Result<Vec<u8>, String> {
        let bytes = load_cover(&path, size).map_err(|e| e.to_string())?;
        info!("🖼️  Loaded cover from {} ({} KB)", path.display(), bytes.len() / 1024);
        Ok(bytes)
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

/// Letter drawn on the placeholder square when a book has no cover
pub fn placeholder_letter(title: &str) -> char {
    title
        .chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn test_encode_cover_crops_to_square() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(40, 80));
        let bytes = encode_cover(&img, 16).unwrap();

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn test_placeholder_letter() {
        assert_eq!(placeholder_letter("dune"), 'D');
        assert_eq!(placeholder_letter("  \"emma\""), 'E');
        assert_eq!(placeholder_letter(""), '?');
    }

    #[tokio::test]
    async fn test_load_cover_from_file() {
        let path = std::env::temp_dir().join(format!("read-me-cover-{}.png", std::process::id()));
        DynamicImage::ImageRgb8(RgbImage::new(30, 20))
            .save(&path)
            .unwrap();

        let bytes = load_cover_async(path.clone(), 8).await.unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_load_cover_missing_file() {
        let result = load_cover_async(PathBuf::from("/nonexistent/cover.png"), 8).await;
        assert!(result.is_err());
    }
}
