//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core photoedit
//! types, handling the conversion between Rust and JavaScript data.

use photoedit_core::{EditError, Image};
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep images in WASM memory and only
/// extract pixels when they need to be drawn.
#[wasm_bindgen]
pub struct JsImage {
    inner: Image,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from dimensions and RGBA pixel data.
    ///
    /// # Errors
    /// Returns an error if either dimension is zero or `pixels` is not
    /// `width * height * 4` bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsImage, JsValue> {
        Image::try_new(width, height, pixels)
            .map(|inner| JsImage { inner })
            .map_err(to_js_error)
    }

    /// Image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn from_image(inner: Image) -> Self {
        Self { inner }
    }

    pub(crate) fn image(&self) -> &Image {
        &self.inner
    }
}

/// Convert a core error to a JavaScript error string.
pub(crate) fn to_js_error(err: EditError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_image_accessors() {
        let img = JsImage::from_image(Image::filled(100, 50, [1, 2, 3, 4]));
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
        assert_eq!(&img.pixels()[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_js_image_wraps_core_image() {
        let core = Image::filled(3, 2, [9, 9, 9, 255]);
        let img = JsImage::from_image(core.clone());
        assert_eq!(img.image(), &core);
    }

    #[test]
    fn test_js_image_new_valid() {
        let img = JsImage::new(2, 1, vec![0u8; 8]);
        assert!(img.is_ok());
    }
}
