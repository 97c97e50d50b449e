//! Slide illustrations: lookup by page number and decoding.
//!
//! Images are matched by filename only: `slide-05.png` belongs to page 5.
//! PNG and JPEG bytes are embedded unchanged; WebP is re-encoded as PNG
//! because PowerPoint does not render WebP media. Only the pixel dimensions
//! are needed otherwise, to compute a "cover" crop.

use crate::error::ExportError;
use crate::pptx::ImageFormat;
use image::DynamicImage;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions tried, in order, for each page.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Decoded illustration ready for embedding.
#[derive(Debug, Clone)]
pub struct SlideImage {
    pub path: PathBuf,
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// File stem of the illustration for `page`: `slide-05`.
pub fn slide_image_stem(page: usize) -> String {
    format!("slide-{page:02}")
}

/// `<dir>/slide-NN.<ext>` for the first extension that exists.
pub fn find_slide_image(dir: &Path, page: usize) -> Option<PathBuf> {
    let stem = slide_image_stem(page);
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}

/// Read `path` and prepare it for embedding.
///
/// The format is sniffed from the bytes, not the extension.
pub fn load_slide_image(path: &Path) -> Result<SlideImage, ExportError> {
    let fail = |detail: String| ExportError::ImageReadFailed {
        path: path.to_path_buf(),
        detail,
    };

    let bytes = std::fs::read(path).map_err(|e| fail(e.to_string()))?;
    let reader = image::ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| fail(e.to_string()))?;

    let image = match reader.format() {
        Some(image::ImageFormat::Png) => {
            let (width, height) = reader.into_dimensions().map_err(|e| fail(e.to_string()))?;
            SlideImage {
                path: path.to_path_buf(),
                data: bytes,
                format: ImageFormat::Png,
                width,
                height,
            }
        }
        Some(image::ImageFormat::Jpeg) => {
            let (width, height) = reader.into_dimensions().map_err(|e| fail(e.to_string()))?;
            SlideImage {
                path: path.to_path_buf(),
                data: bytes,
                format: ImageFormat::Jpeg,
                width,
                height,
            }
        }
        Some(image::ImageFormat::WebP) => {
            let decoded = reader.decode().map_err(|e| fail(e.to_string()))?;
            let data = encode_png(&decoded).map_err(|e| fail(e.to_string()))?;
            SlideImage {
                path: path.to_path_buf(),
                data,
                format: ImageFormat::Png,
                width: decoded.width(),
                height: decoded.height(),
            }
        }
        other => return Err(fail(format!("unsupported image format {other:?}"))),
    };

    debug!(
        "Loaded {} ({}×{}, {} bytes)",
        path.display(),
        image.width,
        image.height,
        image.data.len()
    );
    Ok(image)
}

/// Lossless PNG encoding.
fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_image(dir: &Path, name: &str, format: image::ImageFormat) -> PathBuf {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([200, 80, 10, 255])));
        let path = dir.join(name);
        let img = if format == image::ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };
        img.save_with_format(&path, format).unwrap();
        path
    }

    #[test]
    fn finds_by_zero_padded_page_in_extension_order() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "slide-05.jpg", image::ImageFormat::Jpeg);
        write_image(dir.path(), "slide-05.png", image::ImageFormat::Png);
        let found = find_slide_image(dir.path(), 5).unwrap();
        assert_eq!(found.file_name().unwrap(), "slide-05.png");
        assert!(find_slide_image(dir.path(), 6).is_none());
    }

    #[test]
    fn png_kept_as_is_with_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "slide-01.png", image::ImageFormat::Png);
        let img = load_slide_image(&path).unwrap();
        assert_eq!(img.format, ImageFormat::Png);
        assert_eq!((img.width, img.height), (40, 20));
        assert_eq!(img.data, std::fs::read(&path).unwrap());
    }

    #[test]
    fn format_is_sniffed_not_taken_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "slide-02.png", image::ImageFormat::Jpeg);
        assert_eq!(load_slide_image(&path).unwrap().format, ImageFormat::Jpeg);
    }

    #[test]
    fn webp_is_reencoded_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "slide-03.webp", image::ImageFormat::WebP);
        let img = load_slide_image(&path).unwrap();
        assert_eq!(img.format, ImageFormat::Png);
        assert!(img.data.starts_with(b"\x89PNG"));
        assert_eq!((img.width, img.height), (40, 20));
    }

    #[test]
    fn garbage_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slide-04.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(matches!(
            load_slide_image(&path),
            Err(ExportError::ImageReadFailed { .. })
        ));
    }
}
