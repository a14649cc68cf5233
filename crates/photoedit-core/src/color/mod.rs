//! Per-pixel color transforms built on affine color matrices.
//!
//! Brightness, contrast and the preset filters are all expressed as a
//! [`ColorMatrix`], so they share one code path and compose with
//! [`ColorMatrix::concat`].

mod filter;
mod matrix;

pub use filter::{
    adjust_brightness, adjust_contrast, apply_cool_tone, apply_filter, apply_grayscale,
    apply_vintage, Filter, BRIGHTNESS_RANGE, CONTRAST_RANGE,
};
pub use matrix::ColorMatrix;
