//! Horizontal barcode band detection.
//!
//! Barcodes produce dense horizontal luminance transitions. Each row gets an
//! edge energy `E(y) = sum_x |L(x+1, y) - L(x, y)|`, and a window of
//! `max(8, floor(H * fraction))` rows slides down the image with a running
//! sum. The start with the largest aggregate energy wins; ties keep the
//! earliest start.

use crate::surface::Surface;
use crate::trace::trace_debug;
use crate::util::{TrackScanError, TrackScanResult};

/// Minimum band height in rows.
pub const MIN_BAND_ROWS: usize = 8;

/// Full-width horizontal strip of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandRegion {
    /// First row of the band.
    pub y_start: usize,
    /// Number of rows in the band.
    pub height: usize,
}

impl BandRegion {
    /// Returns one past the last row of the band.
    pub fn y_end(&self) -> usize {
        self.y_start + self.height
    }

    /// Creates a region from fractions of `source_height`, clamped to fit.
    pub fn from_fractions(source_height: usize, top: f32, height: f32) -> TrackScanResult<Self> {
        if !top.is_finite() || !height.is_finite() || !(0.0..1.0).contains(&top) || height <= 0.0
        {
            return Err(TrackScanError::InvalidInput(
                "band fractions must satisfy 0 <= top < 1 and height > 0",
            ));
        }
        // f32 product: 100 * 0.9 must floor to 90.
        let y_start = ((source_height as f32 * top).floor() as usize)
            .min(source_height.saturating_sub(1));
        let rows = ((source_height as f32 * height).floor() as usize).max(1);
        let rows = rows.min(source_height - y_start);
        Ok(Self {
            y_start,
            height: rows,
        })
    }
}

/// Sum of absolute horizontal luminance differences for every row.
pub fn row_edge_energy(surface: &Surface) -> Vec<f64> {
    let width = surface.width();
    let lum = surface.luminance_plane();
    lum.chunks_exact(width)
        .map(|row| {
            row.windows(2)
                .map(|pair| (pair[1] - pair[0]).abs() as f64)
                .sum()
        })
        .collect()
}

/// Finds the band of height `max(8, floor(H * fraction))` with the most edge energy.
///
/// `fraction` must lie strictly between 0 and 1. Images shorter than the
/// minimum band height yield a band covering the whole image.
pub fn detect_band(surface: &Surface, fraction: f32) -> TrackScanResult<BandRegion> {
    if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
        return Err(TrackScanError::InvalidInput("band fraction must be in (0, 1)"));
    }

    let height = surface.height();
    let window = ((height as f32 * fraction).floor() as usize)
        .max(MIN_BAND_ROWS)
        .min(height);
    let energy = row_edge_energy(surface);

    let mut running: f64 = energy[..window].iter().sum();
    let mut best_sum = running;
    let mut best_start = 0usize;
    for start in 1..=(height - window) {
        running += energy[start + window - 1] - energy[start - 1];
        if running > best_sum {
            best_sum = running;
            best_start = start;
        }
    }

    trace_debug!("band_detected", y_start = best_start, rows = window);
    Ok(BandRegion {
        y_start: best_start,
        height: window,
    })
}

#[cfg(test)]
mod tests {
    use super::{detect_band, row_edge_energy, BandRegion};
    use crate::surface::Surface;

    #[test]
    fn flat_image_keeps_earliest_band() {
        let surface = Surface::filled(16, 40, [90, 90, 90, 255]).unwrap();
        let band = detect_band(&surface, 0.25).unwrap();
        assert_eq!(band, BandRegion { y_start: 0, height: 10 });
    }

    #[test]
    fn short_image_is_one_band() {
        let surface = Surface::filled(4, 5, [0, 0, 0, 255]).unwrap();
        let band = detect_band(&surface, 0.5).unwrap();
        assert_eq!(band, BandRegion { y_start: 0, height: 5 });
    }

    #[test]
    fn energy_counts_transitions() {
        let gray = [0u8, 255, 0, 255, 10, 10, 10, 10];
        let surface = Surface::from_gray(&gray, 4, 2).unwrap();
        let energy = row_edge_energy(&surface);
        assert!((energy[0] - 3.0 * 255.0).abs() < 1e-2);
        assert_eq!(energy[1], 0.0);
    }

    #[test]
    fn rejects_degenerate_fraction() {
        let surface = Surface::filled(4, 4, [0, 0, 0, 255]).unwrap();
        assert!(detect_band(&surface, 0.0).is_err());
        assert!(detect_band(&surface, 1.0).is_err());
    }

    #[test]
    fn fractions_clamp_to_source() {
        let region = BandRegion::from_fractions(100, 0.9, 0.5).unwrap();
        assert_eq!(region, BandRegion { y_start: 90, height: 10 });
    }

    #[test]
    fn inexact_fractions_floor_to_the_expected_row() {
        let region = BandRegion::from_fractions(100, 0.4, 0.2).unwrap();
        assert_eq!(region, BandRegion { y_start: 40, height: 20 });
        let region = BandRegion::from_fractions(480, 0.7, 0.3).unwrap();
        assert_eq!(region, BandRegion { y_start: 336, height: 144 });
        let region = BandRegion::from_fractions(10, 0.3, 0.6).unwrap();
        assert_eq!(region, BandRegion { y_start: 3, height: 6 });
    }
}
