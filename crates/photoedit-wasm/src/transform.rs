//! WASM bindings for the stateless transforms.
//!
//! Every function returns a new `JsImage`; the input is left untouched.

use crate::types::{to_js_error, JsImage};
use photoedit_core::color::{adjust_brightness, adjust_contrast, Filter};
use photoedit_core::EditOp;
use photoedit_core::transform::{rotate_with_filter, scale_with_filter, InterpolationFilter};
use wasm_bindgen::prelude::*;

fn interpolation(use_lanczos: bool) -> InterpolationFilter {
    if use_lanczos {
        InterpolationFilter::Lanczos3
    } else {
        InterpolationFilter::Bilinear
    }
}

/// Rotate an image clockwise by `angle_degrees`.
///
/// The canvas grows to fit the rotated image; uncovered corners are
/// transparent.
///
/// ```typescript
/// const rotated = rotate(image, 90.0, false);
/// ```
#[wasm_bindgen]
pub fn rotate(image: &JsImage, angle_degrees: f64, use_lanczos: bool) -> Result<JsImage, JsValue> {
    rotate_with_filter(image.image(), angle_degrees, interpolation(use_lanczos))
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

/// Scale an image by `factor` (> 0).
#[wasm_bindgen]
pub fn scale(image: &JsImage, factor: f64, use_lanczos: bool) -> Result<JsImage, JsValue> {
    scale_with_filter(image.image(), factor, interpolation(use_lanczos))
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

/// Crop to the largest centered rectangle with aspect `ratio` (width / height).
#[wasm_bindgen]
pub fn crop(image: &JsImage, ratio: f64) -> Result<JsImage, JsValue> {
    photoedit_core::crop(image.image(), ratio)
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

/// Brightness offset in [-1, 1].
#[wasm_bindgen]
pub fn brightness(image: &JsImage, amount: f32) -> Result<JsImage, JsValue> {
    adjust_brightness(image.image(), amount)
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

/// Contrast gain in [0, 4].
#[wasm_bindgen]
pub fn contrast(image: &JsImage, amount: f32) -> Result<JsImage, JsValue> {
    adjust_contrast(image.image(), amount)
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

/// Apply a preset filter by name: "none", "grayscale", "vintage" or "cool_tone".
#[wasm_bindgen]
pub fn filter(image: &JsImage, name: &str) -> Result<JsImage, JsValue> {
    let filter = filter_from_name(name)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown filter: {}", name)))?;
    EditOp::Filter { filter }
        .apply(image.image())
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

pub(crate) fn filter_from_name(name: &str) -> Option<Filter> {
    match name {
        "none" => Some(Filter::None),
        "grayscale" => Some(Filter::Grayscale),
        "vintage" => Some(Filter::Vintage),
        "cool_tone" => Some(Filter::CoolTone),
        _ => None,
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use photoedit_core::Image;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_empty_image_returns_error() {
        let empty = JsImage::from_image(Image::new(0, 0, vec![]));
        assert!(rotate(&empty, 45.0, false).is_err());
        assert!(scale(&empty, 2.0, false).is_err());
        assert!(crop(&empty, 1.0).is_err());
        assert!(brightness(&empty, 0.5).is_err());
        assert!(contrast(&empty, 2.0).is_err());
        assert!(filter(&empty, "grayscale").is_err());
    }

    #[wasm_bindgen_test]
    fn test_unknown_filter_returns_error() {
        let img = JsImage::from_image(Image::filled(2, 2, [0, 0, 0, 255]));
        assert!(filter(&img, "sepia").is_err());
    }
}
