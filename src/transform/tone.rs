//! Tone operations: inversion and contrast stretch.

use crate::surface::{Surface, CHANNELS};
use crate::util::math::{clamp_u8, luminance};

/// `255 - c` on R, G and B; alpha is kept. Applying it twice is the identity.
pub fn invert(src: &Surface) -> Surface {
    let mut out = src.data().to_vec();
    for px in out.chunks_exact_mut(CHANNELS) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
    Surface::from_raw_parts(out, src.width(), src.height())
}

/// Converts to grayscale and stretches luminance to the full `0..=255` range.
///
/// A flat image has nothing to stretch and comes back as plain grayscale.
pub fn contrast_stretch(src: &Surface) -> Surface {
    let gray: Vec<u8> = src
        .data()
        .chunks_exact(CHANNELS)
        .map(|px| clamp_u8(luminance(px[0], px[1], px[2])))
        .collect();
    let lo = gray.iter().copied().min().unwrap_or(0);
    let hi = gray.iter().copied().max().unwrap_or(0);
    let span = (hi - lo) as f32;

    let mut out = Vec::with_capacity(src.data().len());
    for (g, px) in gray.iter().zip(src.data().chunks_exact(CHANNELS)) {
        let v = if span == 0.0 {
            *g
        } else {
            clamp_u8((*g - lo) as f32 * 255.0 / span)
        };
        out.extend_from_slice(&[v, v, v, px[3]]);
    }
    Surface::from_raw_parts(out, src.width(), src.height())
}
