//! Photoedit Core - image editing library
//!
//! This crate provides the editing core of a photo editor: geometric
//! transforms (rotate, scale, crop), color adjustments and preset filters,
//! JPEG/PNG decoding, JPEG export, and an edit session with bounded undo.
//!
//! Transforms are pure functions from `&Image` to a new [`Image`]. The
//! [`EditSession`] owns the current image and its history, sharing buffers
//! through `Arc`.

pub mod color;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod history;
pub mod luminance;
pub mod ops;
pub mod raster;
pub mod session;
pub mod transform;

pub use color::{
    adjust_brightness, adjust_contrast, apply_cool_tone, apply_filter, apply_grayscale,
    apply_vintage, ColorMatrix, Filter,
};
pub use config::EditorConfig;
pub use error::EditError;
pub use history::History;
pub use ops::{AspectRatio, EditOp, ScalePreset};
pub use raster::Image;
pub use session::{EditSession, SharedSession};
pub use transform::{crop, crop_rect, rotate, scale, CropRect, InterpolationFilter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_end_to_end() {
        let mut session = EditSession::new(EditorConfig::default()).unwrap();
        session.load(Image::filled(400, 300, [0, 0, 0, 255])).unwrap();

        let bright = session.apply(&EditOp::Brightness { amount: 0.5 }).unwrap();
        assert_eq!((bright.width, bright.height), (400, 300));
        assert_eq!(bright.pixel(200, 150), [127, 127, 127, 255]);

        let square = session.apply(&AspectRatio::Square.to_op()).unwrap();
        assert_eq!((square.width, square.height), (300, 300));

        let half = session.apply(&ScalePreset::Half.to_op()).unwrap();
        assert_eq!((half.width, half.height), (150, 150));

        assert_eq!(session.history_len(), 4);
        let undone = session.undo().unwrap();
        assert_eq!(undone.width, 300);
    }
}
