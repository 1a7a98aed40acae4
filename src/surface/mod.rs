//! RGBA pixel surfaces.
//!
//! A `Surface` is an owned, immutable, row-major RGBA buffer with exactly
//! `width * height * 4` bytes. Transforms never mutate a surface in place;
//! they always allocate a new one.

use crate::util::math::luminance;
use crate::util::{TrackScanError, TrackScanResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Owned RGBA surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

/// Axis-aligned rectangle in pixel coordinates, used for user-selected crops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Surface {
    /// Creates a surface from an RGBA buffer of exactly `width * height * 4` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> TrackScanResult<Self> {
        let needed = required_len(width, height)?;
        if data.len() != needed {
            return Err(TrackScanError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a surface where every pixel is `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> TrackScanResult<Self> {
        let needed = required_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(needed).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Expands a grayscale buffer into an opaque RGBA surface.
    pub fn from_gray(gray: &[u8], width: usize, height: usize) -> TrackScanResult<Self> {
        let needed = required_len(width, height)?;
        if gray.len() != needed / CHANNELS {
            return Err(TrackScanError::BufferSizeMismatch {
                needed: needed / CHANNELS,
                got: gray.len(),
            });
        }
        let mut data = Vec::with_capacity(needed);
        for &v in gray {
            data.extend_from_slice(&[v, v, v, 255]);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a surface by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> TrackScanResult<Self>
    where
        F: FnMut(usize, usize) -> [u8; 4],
    {
        let needed = required_len(width, height)?;
        let mut data = Vec::with_capacity(needed);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wraps a buffer produced by a transform whose dimensions are already known good.
    pub(crate) fn from_raw_parts(data: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the surface width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the surface height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the surface and returns its RGBA bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the RGBA bytes of row `y`.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width * CHANNELS;
        self.data.get(y * stride..(y + 1) * stride)
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * CHANNELS;
        let px = self.data.get(idx..idx + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Luminance of every pixel, row-major.
    pub fn luminance_plane(&self) -> Vec<f32> {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| luminance(px[0], px[1], px[2]))
            .collect()
    }

    /// Copies a rectangle out of the surface.
    pub fn crop_rect(&self, rect: CropRect) -> TrackScanResult<Surface> {
        let out_of_bounds = TrackScanError::RegionOutOfBounds {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            img_width: self.width,
            img_height: self.height,
        };
        if rect.width == 0 || rect.height == 0 {
            return Err(TrackScanError::InvalidDimensions {
                width: rect.width,
                height: rect.height,
            });
        }
        let end_x = rect.x.checked_add(rect.width).ok_or(out_of_bounds.clone())?;
        let end_y = rect.y.checked_add(rect.height).ok_or(out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let mut data = Vec::with_capacity(rect.width * rect.height * CHANNELS);
        for y in rect.y..end_y {
            let start = (y * self.width + rect.x) * CHANNELS;
            data.extend_from_slice(&self.data[start..start + rect.width * CHANNELS]);
        }
        Ok(Surface::from_raw_parts(data, rect.width, rect.height))
    }
}

fn required_len(width: usize, height: usize) -> TrackScanResult<usize> {
    if width == 0 || height == 0 {
        return Err(TrackScanError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or(TrackScanError::InvalidDimensions { width, height })
}
