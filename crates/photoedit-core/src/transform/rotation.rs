//! Image rotation with exact quarter turns and bilinear/Lanczos3 resampling.
//!
//! Multiples of 90° are a lossless pixel remap. Any other angle uses inverse
//! mapping: for each output pixel, rotate its center back into the source and
//! interpolate there. The output canvas is the bounding box of the rotated
//! source; pixels outside the source footprint are fully transparent.
//!
//! Positive angles rotate clockwise as displayed (y axis pointing down):
//!
//! ```text
//! src_x =  dx * cos(θ) + dy * sin(θ) + src_cx
//! src_y = -dx * sin(θ) + dy * cos(θ) + src_cy
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::fill_rows;
use crate::raster::CHANNELS;
use crate::{EditError, Image};

/// Angles within this many degrees of a quarter turn are treated as exact.
const QUARTER_TURN_EPSILON: f64 = 1e-3;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Interpolation filter for rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation, used for previews and edits.
    #[default]
    Bilinear,
    /// Lanczos3 over a 6x6 neighborhood, sharper on export.
    Lanczos3,
}

/// Normalize an angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let n = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// Number of clockwise quarter turns if `degrees` is a multiple of 90°.
fn quarter_turns(degrees: f64) -> Option<u32> {
    let q = normalize_degrees(degrees) / 90.0;
    let nearest = q.round();
    if (q - nearest).abs() * 90.0 < QUARTER_TURN_EPSILON {
        Some(nearest as u32 % 4)
    } else {
        None
    }
}

/// Dimensions of the bounding box of an image rotated by `angle_degrees`.
///
/// Quarter turns are exact; other angles are rounded and never below 1.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = normalize_degrees(angle_degrees).to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();
    let (w, h) = (width as f64, height as f64);

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;
    (new_w.max(1), new_h.max(1))
}

/// Rotate an image clockwise by `degrees` around its center.
///
/// Uses an exact remap for multiples of 90° and bilinear sampling otherwise.
///
/// # Errors
///
/// `InvalidParameter` if `degrees` is NaN or infinite.
pub fn rotate(image: &Image, degrees: f64) -> Result<Image, EditError> {
    rotate_with_filter(image, degrees, InterpolationFilter::Bilinear)
}

/// Rotate with an explicit interpolation filter for non-quarter angles.
pub fn rotate_with_filter(
    image: &Image,
    degrees: f64,
    filter: InterpolationFilter,
) -> Result<Image, EditError> {
    image.validate()?;
    if !degrees.is_finite() {
        return Err(EditError::invalid("degrees", degrees));
    }
    trace!(width = image.width, height = image.height, degrees, ?filter, "rotate");

    if let Some(turns) = quarter_turns(degrees) {
        return Ok(rotate_quarters(image, turns));
    }
    Ok(rotate_resampled(image, normalize_degrees(degrees), filter))
}

/// Exact clockwise rotation by `turns` quarter turns.
fn rotate_quarters(image: &Image, turns: u32) -> Image {
    let (w, h) = (image.width, image.height);
    if turns == 0 {
        return image.clone();
    }
    let (dst_w, dst_h) = if turns % 2 == 1 { (h, w) } else { (w, h) };

    let pixels = fill_rows(dst_w, dst_h, |y, row| {
        for (x, dst) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let x = x as u32;
            let (sx, sy) = match turns {
                1 => (y, h - 1 - x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (w - 1 - y, x),
            };
            dst.copy_from_slice(&image.pixel(sx, sy));
        }
    });

    Image::new(dst_w, dst_h, pixels)
}

fn rotate_resampled(image: &Image, degrees: f64, filter: InterpolationFilter) -> Image {
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, degrees);

    let angle_rad = degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let pixels = fill_rows(dst_w, dst_h, |y, row| {
        let dy = y as f64 + 0.5 - dst_cy;
        for (x, dst) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let dx = x as f64 + 0.5 - dst_cx;

            // Source position in pixel-index space (centers at integers)
            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            let px = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };
            dst.copy_from_slice(&px);
        }
    });

    Image::new(dst_w, dst_h, pixels)
}

#[inline]
fn outside(image: &Image, x: f64, y: f64) -> bool {
    x < -0.5 || y < -0.5 || x > image.width as f64 - 0.5 || y > image.height as f64 - 0.5
}

#[inline]
fn get_pixel_f64(image: &Image, px: i64, py: i64) -> [f64; 4] {
    let x = px.clamp(0, image.width as i64 - 1) as u32;
    let y = py.clamp(0, image.height as i64 - 1) as u32;
    image.pixel(x, y).map(f64::from)
}

/// Bilinear sample over the 4 nearest pixels, edge-clamped.
fn sample_bilinear(image: &Image, x: f64, y: f64) -> [u8; 4] {
    if outside(image, x, y) {
        return TRANSPARENT;
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x0 + 1, y0);
    let p01 = get_pixel_f64(image, x0, y0 + 1);
    let p11 = get_pixel_f64(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 4];
    for i in 0..CHANNELS {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}

/// Lanczos3 sample over a 6x6 neighborhood; bilinear near the border.
fn sample_lanczos3(image: &Image, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as f64, image.height as f64);
    if x < 2.0 || x >= w - 3.0 || y < 2.0 || y >= h - 3.0 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;
    for ky in -2..=3 {
        for kx in -2..=3 {
            let (px, py) = (x0 + kx, y0 + ky);
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
            let pixel = get_pixel_f64(image, px, py);
            for i in 0..CHANNELS {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 4];
    if weight_sum > 0.0 {
        for i in 0..CHANNELS {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }
    result
}

/// `sinc(x) * sinc(x / a)` for `|x| < a`, zero outside.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }
    let pi_x = std::f64::consts::PI * x;
    (a * pi_x.sin() * (pi_x / a).sin()) / (pi_x * pi_x)
}
