//! Pixel arithmetic shared by the transforms and the band detector.

/// ITU-R BT.601 luma of an RGB triple.
#[inline]
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Rounds and clamps a float channel value into `u8`.
#[inline]
pub(crate) fn clamp_u8(value: f32) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Scales a dimension by `factor`, truncating and keeping at least one pixel.
#[inline]
pub(crate) fn scaled_len(len: usize, factor: f32) -> usize {
    ((len as f32 * factor).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::{clamp_u8, luminance, scaled_len};

    #[test]
    fn luminance_weights_sum_to_white() {
        assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-3);
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 0, 0) - 76.245).abs() < 1e-3);
    }

    #[test]
    fn clamp_u8_saturates_and_rounds() {
        assert_eq!(clamp_u8(-4.0), 0);
        assert_eq!(clamp_u8(300.0), 255);
        assert_eq!(clamp_u8(127.5), 128);
        assert_eq!(clamp_u8(f32::NAN), 0);
    }

    #[test]
    fn scaled_len_truncates_and_never_hits_zero() {
        assert_eq!(scaled_len(10, 1.5), 15);
        assert_eq!(scaled_len(7, 1.5), 10);
        assert_eq!(scaled_len(3, 0.1), 1);
    }

    #[test]
    fn scaled_len_uses_the_decimal_factor() {
        assert_eq!(scaled_len(100, 0.35), 35);
        assert_eq!(scaled_len(100, 0.9), 90);
        assert_eq!(scaled_len(640, 0.7), 448);
    }
}
