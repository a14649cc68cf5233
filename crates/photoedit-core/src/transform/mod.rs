//! Geometric transforms: rotation, scaling and cropping.
//!
//! Every function takes `&Image` and returns a new image; inputs are never
//! modified. Invalid parameters are rejected with
//! [`EditError::InvalidParameter`](crate::EditError::InvalidParameter) before
//! any work is done.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop ratios are width / height

mod crop;
mod rotation;
mod scale;

pub use crop::{centered_crop_rect, crop, crop_rect, CropRect};
pub use rotation::{
    compute_rotated_bounds, normalize_degrees, rotate, rotate_with_filter, InterpolationFilter,
};
pub use scale::{resize, resize_to_fit, scale, scale_with_filter, scaled_dimensions};

use crate::raster::CHANNELS;

/// Allocate a `width x height` RGBA buffer and fill it row by row.
///
/// `fill(y, row)` receives the row index and its bytes. Rows are processed in
/// parallel with the `parallel` feature.
pub(crate) fn fill_rows<F>(width: u32, height: u32, fill: F) -> Vec<u8>
where
    F: Fn(u32, &mut [u8]) + Send + Sync,
{
    let row_bytes = width as usize * CHANNELS;
    let mut pixels = vec![0u8; row_bytes * height as usize];
    if row_bytes == 0 {
        return pixels;
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pixels
            .par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| fill(y as u32, row));
    }
    #[cfg(not(feature = "parallel"))]
    pixels
        .chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| fill(y as u32, row));

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rows_visits_every_row() {
        let pixels = fill_rows(3, 4, |y, row| row.fill(y as u8));
        assert_eq!(pixels.len(), 3 * 4 * 4);
        assert!(pixels[..12].iter().all(|&b| b == 0));
        assert!(pixels[36..].iter().all(|&b| b == 3));
    }

    #[test]
    fn test_fill_rows_empty() {
        assert!(fill_rows(0, 5, |_, _| unreachable!()).is_empty());
    }
}
