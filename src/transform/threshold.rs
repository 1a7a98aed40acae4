//! Global and adaptive binarization.
//!
//! Adaptive thresholding compares each pixel against the mean luminance of a
//! square neighborhood of half-width `window`, clamped to the surface. The
//! neighborhood sums come from a summed-area table so every lookup is O(1).

use crate::surface::{Surface, CHANNELS};
use crate::transform::resample::scale;
use crate::util::math::luminance;
use crate::util::TrackScanResult;

/// Summed-area table over a row-major `f32` plane, accumulated in `f64`.
///
/// Entry `(x, y)` of the padded `(w + 1) x (h + 1)` table holds the sum of all
/// samples strictly above and to the left of `(x, y)`.
pub struct IntegralImage {
    sums: Vec<f64>,
    width: usize,
    height: usize,
}

impl IntegralImage {
    /// Builds the table for a `width x height` plane.
    pub fn from_plane(plane: &[f32], width: usize, height: usize) -> Self {
        debug_assert_eq!(plane.len(), width * height);
        let stride = width + 1;
        let mut sums = vec![0.0f64; stride * (height + 1)];
        for y in 0..height {
            let mut row_sum = 0.0f64;
            for x in 0..width {
                row_sum += plane[y * width + x] as f64;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_sum;
            }
        }
        Self {
            sums,
            width,
            height,
        }
    }

    /// Sum over the inclusive rectangle `[x0, x1] x [y0, y1]`.
    pub fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        debug_assert!(x0 <= x1 && x1 < self.width);
        debug_assert!(y0 <= y1 && y1 < self.height);
        let stride = self.width + 1;
        let a = self.sums[y0 * stride + x0];
        let b = self.sums[y0 * stride + x1 + 1];
        let c = self.sums[(y1 + 1) * stride + x0];
        let d = self.sums[(y1 + 1) * stride + x1 + 1];
        d - b - c + a
    }

    /// Mean over the square of half-width `window` centred at `(x, y)`, clamped to bounds.
    pub fn window_mean(&self, x: usize, y: usize, window: usize) -> f64 {
        let x0 = x.saturating_sub(window);
        let y0 = y.saturating_sub(window);
        let x1 = (x + window).min(self.width - 1);
        let y1 = (y + window).min(self.height - 1);
        let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
        self.rect_sum(x0, y0, x1, y1) / count
    }
}

/// Binarizes on luminance: 255 where `L > threshold`, else 0. Alpha is kept.
pub fn global_threshold(src: &Surface, threshold: u8) -> Surface {
    let t = threshold as f32;
    let mut out = Vec::with_capacity(src.data().len());
    for px in src.data().chunks_exact(CHANNELS) {
        let v = if luminance(px[0], px[1], px[2]) > t {
            255
        } else {
            0
        };
        out.extend_from_slice(&[v, v, v, px[3]]);
    }
    Surface::from_raw_parts(out, src.width(), src.height())
}

/// Scales by `scale`, then applies the mean-window adaptive threshold.
///
/// Output is 0 where `L < mean - c` and 255 elsewhere.
pub fn adaptive_threshold(
    src: &Surface,
    window: usize,
    c: f32,
    scale_factor: f32,
) -> TrackScanResult<Surface> {
    let scaled = scale(src, scale_factor)?;
    Ok(adaptive_threshold_unscaled(&scaled, window, c))
}

/// Adaptive threshold at the surface's native resolution.
pub fn adaptive_threshold_unscaled(src: &Surface, window: usize, c: f32) -> Surface {
    let width = src.width();
    let lum = src.luminance_plane();
    let integral = IntegralImage::from_plane(&lum, width, src.height());
    let mut out = src.data().to_vec();
    for (y, row) in out.chunks_exact_mut(width * CHANNELS).enumerate() {
        threshold_row(row, y, &lum, &integral, window, c as f64);
    }
    Surface::from_raw_parts(out, width, src.height())
}

/// Per-pixel neighborhood means used by the adaptive threshold.
pub fn local_means(src: &Surface, window: usize) -> Vec<f64> {
    let width = src.width();
    let height = src.height();
    let lum = src.luminance_plane();
    let integral = IntegralImage::from_plane(&lum, width, height);
    let mut means = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            means.push(integral.window_mean(x, y, window));
        }
    }
    means
}

/// Thresholds one RGBA row in place; alpha bytes are left untouched.
pub(crate) fn threshold_row(
    row: &mut [u8],
    y: usize,
    lum: &[f32],
    integral: &IntegralImage,
    window: usize,
    c: f64,
) {
    let width = integral.width;
    for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let mean = integral.window_mean(x, y, window);
        let l = lum[y * width + x] as f64;
        let v = if l < mean - c { 0 } else { 255 };
        px[0] = v;
        px[1] = v;
        px[2] = v;
    }
}
