//! Resampling to new dimensions.
//!
//! Resizing itself is delegated to `image::imageops::resize`; these functions
//! compute the target size, validate parameters and convert between buffer
//! types. None of them modify their input.

use tracing::trace;

use super::InterpolationFilter;
use crate::{EditError, Image};

impl InterpolationFilter {
    /// The equivalent `image` crate filter.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            InterpolationFilter::Bilinear => image::imageops::FilterType::Triangle,
            InterpolationFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Dimensions after scaling by `factor`: `round(w * factor) x round(h * factor)`,
/// each at least 1.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let w = (width as f64 * factor).round().max(1.0) as u32;
    let h = (height as f64 * factor).round().max(1.0) as u32;
    (w, h)
}

/// Scale an image by `factor` with bilinear resampling.
///
/// # Errors
///
/// `InvalidParameter` if `factor` is not a positive finite number.
pub fn scale(image: &Image, factor: f64) -> Result<Image, EditError> {
    scale_with_filter(image, factor, InterpolationFilter::Bilinear)
}

/// Scale an image by `factor` with an explicit filter.
pub fn scale_with_filter(
    image: &Image,
    factor: f64,
    filter: InterpolationFilter,
) -> Result<Image, EditError> {
    image.validate()?;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(EditError::invalid("scale", factor));
    }
    let (width, height) = scaled_dimensions(image.width, image.height, factor);
    trace!(
        width = image.width,
        height = image.height,
        factor,
        new_width = width,
        new_height = height,
        "scale"
    );
    resize(image, width, height, filter)
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// `InvalidImage` for an empty or malformed image, `InvalidParameter` if
/// either target dimension is zero.
pub fn resize(
    image: &Image,
    width: u32,
    height: u32,
    filter: InterpolationFilter,
) -> Result<Image, EditError> {
    image.validate()?;
    if width == 0 || height == 0 {
        return Err(EditError::invalid("size", 0.0));
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image.to_rgba_image().ok_or(EditError::InvalidImage {
        width: image.width,
        height: image.height,
        len: image.pixels.len(),
    })?;
    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
    Ok(Image::from_rgba_image(resized))
}

/// Downscale so that the longest edge is at most `max_edge`, keeping aspect.
///
/// Images that already fit are returned as an unchanged copy. Useful to bound
/// the cost of editing very large photos.
pub fn resize_to_fit(
    image: &Image,
    max_edge: u32,
    filter: InterpolationFilter,
) -> Result<Image, EditError> {
    image.validate()?;
    if max_edge == 0 {
        return Err(EditError::invalid("max_edge", 0.0));
    }
    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }
    let (width, height) = fit_dimensions(image.width, image.height, max_edge);
    resize(image, width, height, filter)
}

fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let ratio = width as f64 / height as f64;
    if width >= height {
        let h = (max_edge as f64 / ratio).round() as u32;
        (max_edge, h.max(1))
    } else {
        let w = (max_edge as f64 * ratio).round() as u32;
        (w.max(1), max_edge)
    }
}
