//! Luminance weights (ITU-R BT.709) shared by the desaturating filters.

/// BT.709 weight of the red channel.
pub const LUMINANCE_R: f32 = 0.2126;

/// BT.709 weight of the green channel.
pub const LUMINANCE_G: f32 = 0.7152;

/// BT.709 weight of the blue channel.
pub const LUMINANCE_B: f32 = 0.0722;

/// Luminance of 0-255 channel values, as a value in 0.0..=255.0.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
}
