//! Brightness, contrast and the preset color filters.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ColorMatrix;
use crate::{EditError, Image};

/// Valid range for [`adjust_brightness`].
pub const BRIGHTNESS_RANGE: (f32, f32) = (-1.0, 1.0);

/// Valid range for [`adjust_contrast`]. 1.0 leaves the image unchanged.
pub const CONTRAST_RANGE: (f32, f32) = (0.0, 4.0);

/// Saturation kept by the vintage filter before the warm tint.
const VINTAGE_SATURATION: f32 = 0.7;

/// Warm tint: boost red, cut blue, lift everything a little.
const VINTAGE_TINT: ColorMatrix = ColorMatrix::scale([1.2, 1.0, 0.8], [30.0, 20.0, 20.0]);

/// Cool tint: cut red and green, boost blue.
const COOL_TONE: ColorMatrix = ColorMatrix::scale([0.8, 0.9, 1.2], [0.0, 0.0, 0.0]);

/// Preset color filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    None,
    Grayscale,
    Vintage,
    CoolTone,
}

impl Filter {
    /// Every filter, in menu order.
    pub const ALL: [Filter; 4] = [
        Filter::None,
        Filter::Grayscale,
        Filter::Vintage,
        Filter::CoolTone,
    ];

    /// The color matrix this filter applies.
    pub fn matrix(self) -> ColorMatrix {
        match self {
            Filter::None => ColorMatrix::identity(),
            Filter::Grayscale => ColorMatrix::saturation(0.0),
            Filter::Vintage => ColorMatrix::saturation(VINTAGE_SATURATION).concat(&VINTAGE_TINT),
            Filter::CoolTone => COOL_TONE,
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Filter::None => "No filter",
            Filter::Grayscale => "Black & white",
            Filter::Vintage => "Vintage",
            Filter::CoolTone => "Cool tone",
        }
    }
}

/// Add `amount * 255` to each color channel.
///
/// `amount` is clamped to [-1, 1]; alpha is left untouched.
///
/// # Errors
///
/// `InvalidImage` for an empty or malformed image, `InvalidParameter` if
/// `amount` is NaN or infinite.
pub fn adjust_brightness(image: &Image, amount: f32) -> Result<Image, EditError> {
    image.validate()?;
    if !amount.is_finite() {
        return Err(EditError::invalid("brightness", amount as f64));
    }
    let amount = amount.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1);
    trace!(width = image.width, height = image.height, amount, "adjust_brightness");
    Ok(ColorMatrix::brightness(amount).apply(image))
}

/// Scale each color channel around mid-gray: `c * amount + (1 - amount) * 127.5`.
///
/// `amount` is clamped to [0, 4]; alpha is left untouched.
///
/// # Errors
///
/// `InvalidImage` for an empty or malformed image, `InvalidParameter` if
/// `amount` is NaN or infinite.
pub fn adjust_contrast(image: &Image, amount: f32) -> Result<Image, EditError> {
    image.validate()?;
    if !amount.is_finite() {
        return Err(EditError::invalid("contrast", amount as f64));
    }
    let amount = amount.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1);
    trace!(width = image.width, height = image.height, amount, "adjust_contrast");
    Ok(ColorMatrix::contrast(amount).apply(image))
}

/// Desaturate to luminance gray.
pub fn apply_grayscale(image: &Image) -> Image {
    apply_filter(image, Filter::Grayscale)
}

/// Partially desaturate, then apply a warm tint.
pub fn apply_vintage(image: &Image) -> Image {
    apply_filter(image, Filter::Vintage)
}

/// Shift colors toward blue.
pub fn apply_cool_tone(image: &Image) -> Image {
    apply_filter(image, Filter::CoolTone)
}

/// Apply a preset filter. `Filter::None` returns an unchanged copy.
///
/// The output always has the input's shape; an empty image yields an empty
/// image.
pub fn apply_filter(image: &Image, filter: Filter) -> Image {
    trace!(width = image.width, height = image.height, ?filter, "apply_filter");
    match filter {
        Filter::None => image.clone(),
        _ => filter.matrix().apply(image),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = Image> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len).prop_map(move |px| Image::new(w, h, px))
        })
    }

    proptest! {
        /// Brightness 0 and contrast 1 never change a pixel.
        #[test]
        fn prop_identity_parameters(img in image_strategy()) {
            prop_assert_eq!(&adjust_brightness(&img, 0.0).unwrap(), &img);
            prop_assert_eq!(&adjust_contrast(&img, 1.0).unwrap(), &img);
        }

        /// Color adjustments never touch alpha.
        #[test]
        fn prop_alpha_unchanged(img in image_strategy(), amount in -1.0f32..=1.0) {
            let outputs = [
                adjust_brightness(&img, amount).unwrap(),
                adjust_contrast(&img, amount + 1.0).unwrap(),
                apply_grayscale(&img),
                apply_vintage(&img),
                apply_cool_tone(&img),
            ];
            for out in outputs {
                for (a, b) in out.pixels.chunks_exact(4).zip(img.pixels.chunks_exact(4)) {
                    prop_assert_eq!(a[3], b[3]);
                }
            }
        }

        /// Brightness follows clamp(c + amount * 255) with truncation.
        #[test]
        fn prop_brightness_formula(img in image_strategy(), amount in -1.0f32..=1.0) {
            let out = adjust_brightness(&img, amount).unwrap();
            for (o, i) in out.pixels.chunks_exact(4).zip(img.pixels.chunks_exact(4)) {
                for c in 0..3 {
                    let expected = (i[c] as f32 + amount * 255.0).clamp(0.0, 255.0);
                    prop_assert!((o[c] as f32 - expected).abs() <= 1.0);
                }
            }
        }
    }
}
