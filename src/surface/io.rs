//! Loading and saving surfaces via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::surface::Surface;
use crate::util::{TrackScanError, TrackScanResult};
use std::path::Path;

/// Converts any decoded image into an RGBA surface.
pub fn surface_from_dynamic_image(img: &image::DynamicImage) -> TrackScanResult<Surface> {
    let rgba = img.to_rgba8();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    Surface::new(rgba.into_raw(), width, height)
}

/// Loads an image file from disk as an RGBA surface.
pub fn load_surface<P: AsRef<Path>>(path: P) -> TrackScanResult<Surface> {
    let img = image::open(path).map_err(|err| TrackScanError::ImageIo {
        reason: err.to_string(),
    })?;
    surface_from_dynamic_image(&img)
}

/// Writes a surface to disk; the format follows the file extension.
pub fn save_surface<P: AsRef<Path>>(surface: &Surface, path: P) -> TrackScanResult<()> {
    let width = u32::try_from(surface.width()).map_err(|_| TrackScanError::InvalidDimensions {
        width: surface.width(),
        height: surface.height(),
    })?;
    let height =
        u32::try_from(surface.height()).map_err(|_| TrackScanError::InvalidDimensions {
            width: surface.width(),
            height: surface.height(),
        })?;
    let buffer = image::RgbaImage::from_raw(width, height, surface.data().to_vec()).ok_or(
        TrackScanError::BufferSizeMismatch {
            needed: surface.width() * surface.height() * 4,
            got: surface.data().len(),
        },
    )?;
    buffer.save(path).map_err(|err| TrackScanError::ImageIo {
        reason: err.to_string(),
    })
}
