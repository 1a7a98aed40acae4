//! Bilinear resampling.

use crate::surface::{Surface, CHANNELS};
use crate::util::math::{clamp_u8, scaled_len};
use crate::util::{TrackScanError, TrackScanResult};

/// Resamples `src` to `floor(width * factor) x floor(height * factor)`.
///
/// Destination pixel centers map back to source coordinates with
/// `sx = (x + 0.5) * w_in / w_out - 0.5`, clamped to the source, and all four
/// channels are interpolated bilinearly. A factor that leaves the size
/// unchanged returns an exact copy.
pub fn scale(src: &Surface, factor: f32) -> TrackScanResult<Surface> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TrackScanError::InvalidInput("scale factor must be finite and > 0"));
    }
    let dst_width = scaled_len(src.width(), factor);
    let dst_height = scaled_len(src.height(), factor);
    Ok(resize(src, dst_width, dst_height))
}

/// Resizes `src` to exactly `dst_width x dst_height` with bilinear sampling.
pub(crate) fn resize(src: &Surface, dst_width: usize, dst_height: usize) -> Surface {
    let src_width = src.width();
    let src_height = src.height();
    if dst_width == src_width && dst_height == src_height {
        return src.clone();
    }

    let data = src.data();
    let x_ratio = src_width as f32 / dst_width as f32;
    let y_ratio = src_height as f32 / dst_height as f32;
    let max_x = (src_width - 1) as f32;
    let max_y = (src_height - 1) as f32;

    // Horizontal taps are identical for every row.
    let taps: Vec<(usize, usize, f32)> = (0..dst_width)
        .map(|x| {
            let sx = ((x as f32 + 0.5) * x_ratio - 0.5).clamp(0.0, max_x);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(src_width - 1);
            (x0, x1, sx - x0 as f32)
        })
        .collect();

    let mut out = Vec::with_capacity(dst_width * dst_height * CHANNELS);
    for y in 0..dst_height {
        let sy = ((y as f32 + 0.5) * y_ratio - 0.5).clamp(0.0, max_y);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(src_height - 1);
        let fy = sy - y0 as f32;
        let row0 = y0 * src_width;
        let row1 = y1 * src_width;

        for &(x0, x1, fx) in &taps {
            let a = (row0 + x0) * CHANNELS;
            let b = (row0 + x1) * CHANNELS;
            let c = (row1 + x0) * CHANNELS;
            let d = (row1 + x1) * CHANNELS;
            for ch in 0..CHANNELS {
                let top = data[a + ch] as f32 * (1.0 - fx) + data[b + ch] as f32 * fx;
                let bottom = data[c + ch] as f32 * (1.0 - fx) + data[d + ch] as f32 * fx;
                out.push(clamp_u8(top * (1.0 - fy) + bottom * fy));
            }
        }
    }

    Surface::from_raw_parts(out, dst_width, dst_height)
}
