//! Low-level building blocks for custom pipelines.
//!
//! These expose the individual transforms, the summed-area table and the band
//! energy profile for callers that build their own variant lists or want to
//! inspect intermediate views. Most users should go through
//! `DecodeOrchestrator` and `ScanSession`.

pub use crate::band::{row_edge_energy, MIN_BAND_ROWS};
pub use crate::decode::select_symbol;
pub use crate::live::StabilityState;
pub use crate::tracking::{extract_with_pass, matches_carrier, MatchPass};
#[cfg(feature = "rayon")]
pub use crate::transform::parallel::{adaptive_threshold_par, vertical_edge_enhance_par};
pub use crate::transform::{
    adaptive_threshold, adaptive_threshold_unscaled, band_crop, contrast_stretch, crop_band,
    global_threshold, invert, local_means, rotate, scale, sharpen, vertical_edge_enhance,
    vertical_edge_enhance_unscaled, IntegralImage, EDGE_THRESHOLD,
};
