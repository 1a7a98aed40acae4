//! Deterministic surface transforms.
//!
//! Every function here takes a borrowed source surface and returns a freshly
//! allocated one. There is no shared state, so the decode orchestrator can
//! realize any candidate variant from the same source in any order.

mod edges;
#[cfg(feature = "rayon")]
pub mod parallel;
mod resample;
mod rotate;
mod threshold;
mod tone;

pub use edges::{sharpen, vertical_edge_enhance, vertical_edge_enhance_unscaled, EDGE_THRESHOLD};
pub use resample::scale;
pub use rotate::{rotate, Rotation};
pub use threshold::{
    adaptive_threshold, adaptive_threshold_unscaled, global_threshold, local_means,
    IntegralImage,
};
pub use tone::{contrast_stretch, invert};

use crate::band::{detect_band, BandRegion};
use crate::surface::{CropRect, Surface};
use crate::util::{TrackScanError, TrackScanResult};

/// Cuts the full-width band `region` out of `src` and resamples it by `scale_factor`.
pub fn crop_band(src: &Surface, region: BandRegion, scale_factor: f32) -> TrackScanResult<Surface> {
    if region.height == 0 || region.y_end() > src.height() {
        return Err(TrackScanError::RegionOutOfBounds {
            x: 0,
            y: region.y_start,
            width: src.width(),
            height: region.height,
            img_width: src.width(),
            img_height: src.height(),
        });
    }
    let band = src.crop_rect(CropRect {
        x: 0,
        y: region.y_start,
        width: src.width(),
        height: region.height,
    })?;
    scale(&band, scale_factor)
}

/// Crops the densest edge band (see [`crate::band`]) and upscales it.
pub fn band_crop(src: &Surface, fraction: f32, scale_factor: f32) -> TrackScanResult<Surface> {
    let region = detect_band(src, fraction)?;
    crop_band(src, region, scale_factor)
}
