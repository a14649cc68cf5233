//! JPEG encoding for export.
//!
//! JPEG has no alpha channel, so the RGB channels of the current image are
//! written as-is and alpha is dropped.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::debug;

use crate::raster::CHANNELS;
use crate::Image;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the image dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder itself failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image to JPEG bytes.
///
/// `quality` is clamped to 1..=100. The editor exports at 90 by default
/// (see [`EditorConfig`](crate::EditorConfig)).
pub fn encode_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = image.pixel_count() * CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let rgb: Vec<u8> = image
        .pixels
        .chunks_exact(CHANNELS)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!(width, height, quality, size = bytes.len(), "Encoded JPEG");
    Ok(bytes)
}
