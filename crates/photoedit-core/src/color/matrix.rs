//! Affine 4x5 color matrices.
//!
//! A matrix maps each RGBA pixel independently:
//!
//! ```text
//! R' = m[0][0]*R + m[0][1]*G + m[0][2]*B + m[0][3]*A + m[0][4]
//! G' = m[1][0]*R + ...                              + m[1][4]
//! B' = ...
//! A' = ...
//! ```
//!
//! Channels are in 0..=255 units, so the offset column is in the same units.
//! Results are clamped to 0..=255 and truncated toward zero.

use crate::luminance::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::raster::CHANNELS;
use crate::Image;

/// Added before truncation so that sums of weights such as the luminance
/// coefficients, which land a few ULPs under an integer, do not lose a level.
const QUANTIZE_BIAS: f32 = 1e-3;

/// An affine color transform applied per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    pub rows: [[f32; 5]; 4],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    pub const fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// Per-channel gains and offsets for R, G, B. Alpha passes through.
    pub const fn scale(gains: [f32; 3], offsets: [f32; 3]) -> Self {
        Self {
            rows: [
                [gains[0], 0.0, 0.0, 0.0, offsets[0]],
                [0.0, gains[1], 0.0, 0.0, offsets[1]],
                [0.0, 0.0, gains[2], 0.0, offsets[2]],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// Add `amount * 255` to each color channel.
    pub fn brightness(amount: f32) -> Self {
        let offset = amount * 255.0;
        Self::scale([1.0; 3], [offset; 3])
    }

    /// `c * amount + (1 - amount) * 127.5` per color channel.
    pub fn contrast(amount: f32) -> Self {
        let offset = (1.0 - amount) * 127.5;
        Self::scale([amount; 3], [offset; 3])
    }

    /// Interpolate between luminance gray (`s = 0`) and the input (`s = 1`).
    pub fn saturation(s: f32) -> Self {
        let inv = 1.0 - s;
        let r = inv * LUMINANCE_R;
        let g = inv * LUMINANCE_G;
        let b = inv * LUMINANCE_B;
        Self {
            rows: [
                [r + s, g, b, 0.0, 0.0],
                [r, g + s, b, 0.0, 0.0],
                [r, g, b + s, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// The matrix that applies `self` first and then `next`.
    pub fn concat(&self, next: &ColorMatrix) -> ColorMatrix {
        let mut out = [[0.0f32; 5]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut v: f32 = (0..4).map(|k| next.rows[i][k] * self.rows[k][j]).sum();
                if j == 4 {
                    v += next.rows[i][4];
                }
                *cell = v;
            }
        }
        ColorMatrix { rows: out }
    }

    /// Transform one RGBA pixel.
    #[inline]
    pub fn apply_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        let input = [px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32];
        let mut out = [0u8; 4];
        for (o, row) in out.iter_mut().zip(self.rows.iter()) {
            let v = row[0] * input[0]
                + row[1] * input[1]
                + row[2] * input[2]
                + row[3] * input[3]
                + row[4];
            *o = quantize(v);
        }
        out
    }

    /// Produce a new image with every pixel transformed.
    pub fn apply(&self, image: &Image) -> Image {
        let mut output = vec![0u8; image.pixels.len()];
        let map = |(dst, src): (&mut [u8], &[u8])| {
            let px = self.apply_pixel([src[0], src[1], src[2], src[3]]);
            dst.copy_from_slice(&px);
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            output
                .par_chunks_exact_mut(CHANNELS)
                .zip(image.pixels.par_chunks_exact(CHANNELS))
                .for_each(map);
        }
        #[cfg(not(feature = "parallel"))]
        output
            .chunks_exact_mut(CHANNELS)
            .zip(image.pixels.chunks_exact(CHANNELS))
            .for_each(map);

        // Same shape as the input, even if the input buffer is malformed
        Image {
            width: image.width,
            height: image.height,
            pixels: output,
        }
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v + QUANTIZE_BIAS).clamp(0.0, 255.0) as u8
}
