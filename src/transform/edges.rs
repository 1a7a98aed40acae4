//! Gradient-based enhancement: vertical bar emphasis and sharpening.

use crate::surface::{Surface, CHANNELS};
use crate::transform::resample::scale;
use crate::util::math::clamp_u8;
use crate::util::TrackScanResult;

/// Gradient magnitude above which a pixel is treated as a bar edge.
pub const EDGE_THRESHOLD: f32 = 64.0;

/// Scales, then emphasizes vertical bars with a horizontal Sobel gradient.
///
/// `|gx|` is clamped to 255 and binarized against [`EDGE_THRESHOLD`]. The one
/// pixel border has no full neighborhood and stays black.
pub fn vertical_edge_enhance(src: &Surface, scale_factor: f32) -> TrackScanResult<Surface> {
    let scaled = scale(src, scale_factor)?;
    Ok(vertical_edge_enhance_unscaled(&scaled))
}

/// Vertical edge enhancement at native resolution.
pub fn vertical_edge_enhance_unscaled(src: &Surface) -> Surface {
    let width = src.width();
    let lum = src.luminance_plane();
    let mut out = src.data().to_vec();
    for (y, row) in out.chunks_exact_mut(width * CHANNELS).enumerate() {
        edge_row(row, y, &lum, width, src.height());
    }
    Surface::from_raw_parts(out, width, src.height())
}

/// Writes the binarized Sobel-x response for row `y`; alpha is untouched.
pub(crate) fn edge_row(row: &mut [u8], y: usize, lum: &[f32], width: usize, height: usize) {
    let interior_row = y > 0 && y + 1 < height;
    for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let mut v = 0u8;
        if interior_row && x > 0 && x + 1 < width {
            let at = |xx: usize, yy: usize| lum[yy * width + xx];
            let gx = -at(x - 1, y - 1) + at(x + 1, y - 1) - 2.0 * at(x - 1, y)
                + 2.0 * at(x + 1, y)
                - at(x - 1, y + 1)
                + at(x + 1, y + 1);
            let magnitude = gx.abs().min(255.0);
            if magnitude > EDGE_THRESHOLD {
                v = 255;
            }
        }
        px[0] = v;
        px[1] = v;
        px[2] = v;
    }
}

/// 3x3 sharpen (`[0,-1,0; -1,5,-1; 0,-1,0]`) on R, G and B.
///
/// Border pixels and alpha are copied unchanged.
pub fn sharpen(src: &Surface) -> Surface {
    let width = src.width();
    let height = src.height();
    let data = src.data();
    let mut out = data.to_vec();
    if width < 3 || height < 3 {
        return Surface::from_raw_parts(out, width, height);
    }

    let idx = |x: usize, y: usize, ch: usize| (y * width + x) * CHANNELS + ch;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            for ch in 0..3 {
                let center = data[idx(x, y, ch)] as f32;
                let value = 5.0 * center
                    - data[idx(x - 1, y, ch)] as f32
                    - data[idx(x + 1, y, ch)] as f32
                    - data[idx(x, y - 1, ch)] as f32
                    - data[idx(x, y + 1, ch)] as f32;
                out[idx(x, y, ch)] = clamp_u8(value);
            }
        }
    }
    Surface::from_raw_parts(out, width, height)
}
