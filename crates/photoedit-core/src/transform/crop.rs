//! Centered aspect-ratio cropping.
//!
//! [`crop`] finds the largest rectangle with the requested width/height ratio
//! that fits in the source, centers it, and copies it out. The result is
//! always a new image, including when the rectangle covers the whole source.

use tracing::trace;

use crate::raster::CHANNELS;
use crate::{EditError, Image};

/// A pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The largest centered rectangle of aspect `ratio` inside `width x height`.
///
/// The cropped dimension is rounded and kept within `1..=source`. `ratio`
/// must be positive; callers validate it.
pub fn centered_crop_rect(width: u32, height: u32, ratio: f64) -> CropRect {
    let source_ratio = width as f64 / height.max(1) as f64;

    let (crop_w, crop_h) = if source_ratio > ratio {
        // Source is wider than the target: trim the sides
        let w = (height as f64 * ratio).round() as u32;
        (w.clamp(1, width.max(1)), height)
    } else {
        // Source is taller than (or equal to) the target: trim top and bottom
        let h = (width as f64 / ratio).round() as u32;
        (width, h.clamp(1, height.max(1)))
    };

    CropRect {
        x: width.saturating_sub(crop_w) / 2,
        y: height.saturating_sub(crop_h) / 2,
        width: crop_w,
        height: crop_h,
    }
}

/// Crop to the largest centered rectangle with aspect `ratio` (width/height).
///
/// # Errors
///
/// `InvalidImage` for an empty or malformed image, `InvalidParameter` if
/// `ratio` is not a positive finite number.
///
/// # Example
///
/// ```ignore
/// let square = crop(&photo_800x600, 1.0)?;
/// assert_eq!((square.width, square.height), (600, 600));
/// ```
pub fn crop(image: &Image, ratio: f64) -> Result<Image, EditError> {
    image.validate()?;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(EditError::invalid("ratio", ratio));
    }
    let rect = centered_crop_rect(image.width, image.height, ratio);
    trace!(
        width = image.width,
        height = image.height,
        ratio,
        x = rect.x,
        y = rect.y,
        crop_w = rect.width,
        crop_h = rect.height,
        "crop"
    );
    crop_rect(image, rect)
}

/// Copy a pixel rectangle out of `image`.
///
/// The rectangle is clamped to the image bounds and is at least 1x1.
///
/// # Errors
///
/// `InvalidImage` for an empty or malformed image.
pub fn crop_rect(image: &Image, rect: CropRect) -> Result<Image, EditError> {
    image.validate()?;
    let left = rect.x.min(image.width.saturating_sub(1));
    let top = rect.y.min(image.height.saturating_sub(1));
    let right = left.saturating_add(rect.width).min(image.width);
    let bottom = top.saturating_add(rect.height).min(image.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    let row_bytes = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);
    for y in top..top + out_height {
        let start = image.offset(left, y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(Image::new(out_width, out_height, output))
}
