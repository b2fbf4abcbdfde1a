//! Derived image variants.
//!
//! An uploaded PNG, JPEG or WebP is re-encoded in its own format at three
//! sizes. Each variant fits inside a square bound without upscaling, so the
//! byte sizes grow from `small` to `large`.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Formats variants are generated for.
const SUPPORTED_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// Thumbnail.
    Small,
    Medium,
    /// Full resolution (capped), high quality.
    Large,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::Small, ImageSize::Medium, ImageSize::Large];

    /// Filename suffix and query value.
    pub fn suffix(self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
        }
    }

    /// Bound (pixels) on both width and height.
    pub fn max_dimension(self) -> u32 {
        match self {
            ImageSize::Small => 150,
            ImageSize::Medium => 600,
            ImageSize::Large => 2048,
        }
    }

    fn jpeg_quality(self) -> u8 {
        match self {
            ImageSize::Small => 70,
            ImageSize::Medium => 80,
            ImageSize::Large => 92,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for ImageSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageSize::ALL
            .into_iter()
            .find(|size| size.suffix() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid image size '{s}'. Must be one of: small, medium, large"
                ))
            })
    }
}

/// One encoded variant.
#[derive(Debug, Clone)]
pub struct DerivedImage {
    pub size: ImageSize,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Sniff the content; `Some` only for formats variants are generated for.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .filter(|format| SUPPORTED_FORMATS.contains(format))
}

/// Derive every [`ImageSize`] variant of `bytes`.
///
/// Returns `Ok(None)` when the content is not a decodable supported image.
/// CPU bound: call from a blocking thread.
pub fn derive_variants(bytes: &[u8]) -> Result<Option<Vec<DerivedImage>>, CoreError> {
    let Some(format) = detect_format(bytes) else {
        return Ok(None);
    };
    let Ok(source) = image::load_from_memory_with_format(bytes, format) else {
        return Ok(None);
    };

    ImageSize::ALL
        .into_iter()
        .map(|size| {
            let resized = fit_within(&source, size.max_dimension());
            let bytes = encode(&resized, format, size)?;
            Ok(DerivedImage {
                size,
                bytes,
                width: resized.width(),
                height: resized.height(),
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()
        .map(Some)
}

/// `Content-Type` for a stored file, by extension.
pub fn mime_type_for(file_name: &str) -> &'static str {
    ImageFormat::from_path(file_name)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// Shrink to fit a `max` x `max` box, keeping aspect ratio. Never upscales.
fn fit_within(image: &DynamicImage, max: u32) -> DynamicImage {
    if image.width() <= max && image.height() <= max {
        image.clone()
    } else {
        image.resize(max, max, FilterType::Lanczos3)
    }
}

fn encode(image: &DynamicImage, format: ImageFormat, size: ImageSize) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    let result = match format {
        ImageFormat::Jpeg => {
            // JPEG carries no alpha channel.
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, size.jpeg_quality()))
        }
        // The WebP encoder is lossless and only takes 8-bit RGB(A).
        ImageFormat::WebP => DynamicImage::ImageRgba8(image.to_rgba8())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP),
        other => image.write_to(&mut Cursor::new(&mut buf), other),
    };
    result.map_err(|e| CoreError::Internal(format!("Failed to encode {size} variant: {e}")))?;
    Ok(buf)
}
