//! The raster image type passed between transforms and the edit session.

use crate::EditError;

/// Bytes per pixel in an [`Image`] buffer (RGBA8).
pub const CHANNELS: usize = 4;

/// An RGBA8 raster image.
///
/// Images are treated as immutable once produced: every transform takes
/// `&Image` and returns a freshly allocated `Image`. The edit session shares
/// them behind `Arc` so that the current image and its history slot are the
/// same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel, straight alpha).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl Image {
    /// Create a new Image with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image, checking that it is non-empty and that `pixels`
    /// holds exactly `width * height * 4` bytes.
    ///
    /// # Errors
    ///
    /// `InvalidImage` otherwise.
    pub fn try_new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        let image = Self {
            width,
            height,
            pixels,
        };
        image.validate()?;
        Ok(image)
    }

    /// Check the invariants transforms rely on: both dimensions non-zero and
    /// a buffer of exactly `width * height * 4` bytes.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.is_empty() || self.pixels.len() != self.pixel_count() * CHANNELS {
            return Err(EditError::InvalidImage {
                width: self.width,
                height: self.height,
                len: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Create an image filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self::new(width, height, pixels)
    }

    /// Create an Image from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbaImage` for processing with the `image` crate.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read the pixel at (x, y). Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let img = Image::new(100, 50, vec![0u8; 100 * 50 * 4]);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.byte_size(), 20000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_image_empty() {
        let img = Image::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_try_new_checks_buffer() {
        assert!(Image::try_new(2, 2, vec![0u8; 16]).is_ok());
        assert!(matches!(
            Image::try_new(0, 0, vec![]),
            Err(EditError::InvalidImage { width: 0, height: 0, len: 0 })
        ));
        assert!(matches!(
            Image::try_new(2, 2, vec![0u8; 15]),
            Err(EditError::InvalidImage { len: 15, .. })
        ));
        assert!(Image::try_new(3, 0, vec![]).is_err());
    }

    #[test]
    fn test_validate_catches_mutated_fields() {
        let mut img = Image::filled(2, 2, [0, 0, 0, 255]);
        assert!(img.validate().is_ok());
        img.width = 5;
        assert!(img.validate().is_err());
    }

    #[test]
    fn test_filled_and_pixel_access() {
        let img = Image::filled(3, 2, [10, 20, 30, 255]);
        assert_eq!(img.pixel(2, 1), [10, 20, 30, 255]);
        assert_eq!(img.offset(1, 1), 16);
    }

    #[test]
    fn test_rgba_image_roundtrip_preserves_alpha() {
        let img = Image::filled(4, 4, [1, 2, 3, 77]);
        let back = Image::from_rgba_image(img.to_rgba_image().unwrap());
        assert_eq!(back, img);
    }

    #[test]
    fn test_aspect_ratio() {
        let img = Image::filled(800, 600, [0, 0, 0, 255]);
        assert!((img.aspect_ratio() - 4.0 / 3.0).abs() < 1e-9);
    }
}
