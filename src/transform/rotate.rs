//! Exact quarter-turn rotations.

use crate::surface::{Surface, CHANNELS};
use crate::util::{TrackScanError, TrackScanResult};

/// Clockwise rotation by a multiple of 90 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parses 90, 180 or 270.
    pub fn from_degrees(degrees: u32) -> TrackScanResult<Self> {
        match degrees {
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(TrackScanError::InvalidInput(
                "rotation must be 90, 180 or 270 degrees",
            )),
        }
    }

    /// Returns the angle in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

/// Rotates clockwise about the center; 90 and 270 swap width and height.
pub fn rotate(src: &Surface, rotation: Rotation) -> Surface {
    let w = src.width();
    let h = src.height();
    let (dst_w, dst_h) = match rotation {
        Rotation::Deg180 => (w, h),
        Rotation::Deg90 | Rotation::Deg270 => (h, w),
    };

    let data = src.data();
    let mut out = Vec::with_capacity(data.len());
    for y in 0..dst_h {
        for x in 0..dst_w {
            let (sx, sy) = match rotation {
                Rotation::Deg90 => (y, h - 1 - x),
                Rotation::Deg180 => (w - 1 - x, h - 1 - y),
                Rotation::Deg270 => (w - 1 - y, x),
            };
            let idx = (sy * w + sx) * CHANNELS;
            out.extend_from_slice(&data[idx..idx + CHANNELS]);
        }
    }
    Surface::from_raw_parts(out, dst_w, dst_h)
}
