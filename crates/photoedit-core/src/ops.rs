//! Edit operations and the preset values offered by the editor's tools.
//!
//! An [`EditOp`] names one transform together with its parameters so the
//! session (or a UI) can preview, apply and log it uniformly.

use serde::{Deserialize, Serialize};

use crate::color::{adjust_brightness, adjust_contrast, apply_filter, Filter};
use crate::transform::{crop, rotate_with_filter, scale_with_filter, InterpolationFilter};
use crate::{EditError, Image};

/// One edit applied to the current image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Rotate clockwise by `degrees`.
    Rotate { degrees: f64 },
    /// Scale both dimensions by `factor` (> 0).
    Scale { factor: f64 },
    /// Centered crop to `ratio` = width / height (> 0).
    Crop { ratio: f64 },
    /// Brightness offset in [-1, 1].
    Brightness { amount: f32 },
    /// Contrast gain in [0, 4].
    Contrast { amount: f32 },
    /// Preset color filter.
    Filter { filter: Filter },
}

impl EditOp {
    /// Run the operation, using `interpolation` for rotation and scaling.
    pub fn apply_with(
        &self,
        image: &Image,
        interpolation: InterpolationFilter,
    ) -> Result<Image, EditError> {
        match *self {
            EditOp::Rotate { degrees } => rotate_with_filter(image, degrees, interpolation),
            EditOp::Scale { factor } => scale_with_filter(image, factor, interpolation),
            EditOp::Crop { ratio } => crop(image, ratio),
            EditOp::Brightness { amount } => adjust_brightness(image, amount),
            EditOp::Contrast { amount } => adjust_contrast(image, amount),
            EditOp::Filter { filter } => {
                image.validate()?;
                Ok(apply_filter(image, filter))
            }
        }
    }

    /// Run the operation with bilinear interpolation.
    pub fn apply(&self, image: &Image) -> Result<Image, EditError> {
        self.apply_with(image, InterpolationFilter::Bilinear)
    }

    /// Short name for logs and toasts.
    pub fn name(&self) -> &'static str {
        match self {
            EditOp::Rotate { .. } => "rotate",
            EditOp::Scale { .. } => "scale",
            EditOp::Crop { .. } => "crop",
            EditOp::Brightness { .. } => "brightness",
            EditOp::Contrast { .. } => "contrast",
            EditOp::Filter { .. } => "filter",
        }
    }
}

/// Crop ratios offered by the crop tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    /// 1:1
    Square,
    /// 3:4
    Portrait,
    /// 4:3
    Landscape,
    /// 9:16
    Phone,
    /// 16:9
    Widescreen,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::Phone,
        AspectRatio::Widescreen,
    ];

    /// Width / height.
    pub fn ratio(self) -> f64 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::Portrait => 3.0 / 4.0,
            AspectRatio::Landscape => 4.0 / 3.0,
            AspectRatio::Phone => 9.0 / 16.0,
            AspectRatio::Widescreen => 16.0 / 9.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Phone => "9:16",
            AspectRatio::Widescreen => "16:9",
        }
    }

    pub fn to_op(self) -> EditOp {
        EditOp::Crop {
            ratio: self.ratio(),
        }
    }
}

/// Scale factors offered by the scale tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalePreset {
    Half,
    ThreeQuarters,
    Original,
    OneAndQuarter,
    OneAndHalf,
    Double,
}

impl ScalePreset {
    pub const ALL: [ScalePreset; 6] = [
        ScalePreset::Half,
        ScalePreset::ThreeQuarters,
        ScalePreset::Original,
        ScalePreset::OneAndQuarter,
        ScalePreset::OneAndHalf,
        ScalePreset::Double,
    ];

    pub fn factor(self) -> f64 {
        match self {
            ScalePreset::Half => 0.5,
            ScalePreset::ThreeQuarters => 0.75,
            ScalePreset::Original => 1.0,
            ScalePreset::OneAndQuarter => 1.25,
            ScalePreset::OneAndHalf => 1.5,
            ScalePreset::Double => 2.0,
        }
    }

    pub fn to_op(self) -> EditOp {
        EditOp::Scale {
            factor: self.factor(),
        }
    }
}
