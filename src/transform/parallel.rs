//! Row-parallel variants of the per-pixel neighborhood transforms (rayon).
//!
//! Rows are independent once the luminance plane and summed-area table are
//! built, so each row is handed to the thread pool. Output is byte-identical
//! to the sequential path because both call the same row kernels.

use crate::surface::{Surface, CHANNELS};
use crate::transform::edges::edge_row;
use crate::transform::resample::scale;
use crate::transform::threshold::{threshold_row, IntegralImage};
use crate::util::TrackScanResult;
use rayon::prelude::*;

/// Parallel counterpart of [`crate::transform::adaptive_threshold`].
pub fn adaptive_threshold_par(
    src: &Surface,
    window: usize,
    c: f32,
    scale_factor: f32,
) -> TrackScanResult<Surface> {
    let scaled = scale(src, scale_factor)?;
    let width = scaled.width();
    let height = scaled.height();
    let lum = scaled.luminance_plane();
    let integral = IntegralImage::from_plane(&lum, width, height);
    let mut out = scaled.into_data();
    out.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| threshold_row(row, y, &lum, &integral, window, c as f64));
    Ok(Surface::from_raw_parts(out, width, height))
}

/// Parallel counterpart of [`crate::transform::vertical_edge_enhance`].
pub fn vertical_edge_enhance_par(src: &Surface, scale_factor: f32) -> TrackScanResult<Surface> {
    let scaled = scale(src, scale_factor)?;
    let width = scaled.width();
    let height = scaled.height();
    let lum = scaled.luminance_plane();
    let mut out = scaled.into_data();
    out.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| edge_row(row, y, &lum, width, height));
    Ok(Surface::from_raw_parts(out, width, height))
}
