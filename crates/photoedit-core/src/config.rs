//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::transform::InterpolationFilter;
use crate::EditError;

/// Default undo depth.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Default JPEG export quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default angle of one press of the rotate tool, in degrees.
pub const DEFAULT_ROTATE_STEP: f64 = 90.0;

/// Settings for an [`EditSession`](crate::EditSession).
///
/// Every field has a default, so a partial JSON object deserializes into a
/// complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of images kept for undo, including the loaded original.
    pub max_history: usize,
    /// JPEG quality (1-100) used by export.
    pub jpeg_quality: u8,
    /// Rotation applied by the rotate tool.
    pub rotate_step: f64,
    /// Resampling filter for rotation and scaling.
    pub interpolation: InterpolationFilter,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            rotate_step: DEFAULT_ROTATE_STEP,
            interpolation: InterpolationFilter::default(),
        }
    }
}

impl EditorConfig {
    /// Check that the settings are usable.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a zero history depth, a quality outside 1-100,
    /// or a non-finite rotate step.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.max_history == 0 {
            return Err(EditError::invalid("max_history", 0.0));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(EditError::invalid(
                "jpeg_quality",
                self.jpeg_quality as f64,
            ));
        }
        if !self.rotate_step.is_finite() {
            return Err(EditError::invalid("rotate_step", self.rotate_step));
        }
        Ok(())
    }
}
