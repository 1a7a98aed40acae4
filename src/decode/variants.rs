//! The ordered candidate variant list.
//!
//! The orchestrator stops at the first variant that decodes, so cheap and
//! likely views come first and exotic ones (rotations) come last.

use std::borrow::Cow;
use std::fmt;

use crate::band::BandRegion;
use crate::surface::Surface;
use crate::transform::{self, Rotation};
use crate::util::TrackScanResult;

/// A named, parameterized transform that yields one view of the source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CandidateVariant {
    /// The source as captured.
    Original,
    /// Bilinear resample.
    Scale { factor: f32 },
    /// Densest edge band, upscaled.
    BandCrop { fraction: f32, scale: f32 },
    /// Full-width band at fixed fractions of the height, upscaled.
    FixedCrop { top: f32, height: f32, scale: f32 },
    AdaptiveThreshold { window: usize, c: f32, scale: f32 },
    VerticalEdges { scale: f32 },
    GlobalThreshold { threshold: u8, scale: f32 },
    ContrastStretch,
    Sharpen,
    Invert,
    Rotate(Rotation),
}

/// Default search order.
pub const DEFAULT_VARIANTS: [CandidateVariant; 17] = [
    CandidateVariant::Original,
    CandidateVariant::Scale { factor: 1.5 },
    CandidateVariant::Scale { factor: 2.0 },
    CandidateVariant::BandCrop {
        fraction: 0.35,
        scale: 2.0,
    },
    CandidateVariant::FixedCrop {
        top: 0.25,
        height: 0.5,
        scale: 2.0,
    },
    CandidateVariant::FixedCrop {
        top: 0.4,
        height: 0.2,
        scale: 3.0,
    },
    CandidateVariant::AdaptiveThreshold {
        window: 12,
        c: 10.0,
        scale: 2.0,
    },
    CandidateVariant::AdaptiveThreshold {
        window: 24,
        c: 6.0,
        scale: 1.5,
    },
    CandidateVariant::VerticalEdges { scale: 2.0 },
    CandidateVariant::GlobalThreshold {
        threshold: 128,
        scale: 1.0,
    },
    CandidateVariant::GlobalThreshold {
        threshold: 140,
        scale: 2.0,
    },
    CandidateVariant::ContrastStretch,
    CandidateVariant::Sharpen,
    CandidateVariant::Invert,
    CandidateVariant::Rotate(Rotation::Deg90),
    CandidateVariant::Rotate(Rotation::Deg180),
    CandidateVariant::Rotate(Rotation::Deg270),
];

impl CandidateVariant {
    /// Short stable label for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            CandidateVariant::Original => "original",
            CandidateVariant::Scale { .. } => "scale",
            CandidateVariant::BandCrop { .. } => "band_crop",
            CandidateVariant::FixedCrop { .. } => "fixed_crop",
            CandidateVariant::AdaptiveThreshold { .. } => "adaptive_threshold",
            CandidateVariant::VerticalEdges { .. } => "vertical_edges",
            CandidateVariant::GlobalThreshold { .. } => "global_threshold",
            CandidateVariant::ContrastStretch => "contrast_stretch",
            CandidateVariant::Sharpen => "sharpen",
            CandidateVariant::Invert => "invert",
            CandidateVariant::Rotate(Rotation::Deg90) => "rotate_90",
            CandidateVariant::Rotate(Rotation::Deg180) => "rotate_180",
            CandidateVariant::Rotate(Rotation::Deg270) => "rotate_270",
        }
    }

    /// Produces this variant's view of `src`.
    pub fn apply<'a>(&self, src: &'a Surface) -> TrackScanResult<Cow<'a, Surface>> {
        self.apply_with(src, false)
    }

    /// Like [`apply`](Self::apply); `parallel` selects the row-parallel
    /// neighborhood kernels when the `rayon` feature is enabled.
    pub fn apply_with<'a>(
        &self,
        src: &'a Surface,
        parallel: bool,
    ) -> TrackScanResult<Cow<'a, Surface>> {
        let out = match *self {
            CandidateVariant::Original => return Ok(Cow::Borrowed(src)),
            CandidateVariant::Scale { factor } => transform::scale(src, factor)?,
            CandidateVariant::BandCrop { fraction, scale } => {
                transform::band_crop(src, fraction, scale)?
            }
            CandidateVariant::FixedCrop { top, height, scale } => {
                let region = BandRegion::from_fractions(src.height(), top, height)?;
                transform::crop_band(src, region, scale)?
            }
            CandidateVariant::AdaptiveThreshold { window, c, scale } => {
                adaptive_threshold(src, window, c, scale, parallel)?
            }
            CandidateVariant::VerticalEdges { scale } => vertical_edges(src, scale, parallel)?,
            CandidateVariant::GlobalThreshold { threshold, scale } => {
                let scaled = transform::scale(src, scale)?;
                transform::global_threshold(&scaled, threshold)
            }
            CandidateVariant::ContrastStretch => transform::contrast_stretch(src),
            CandidateVariant::Sharpen => transform::sharpen(src),
            CandidateVariant::Invert => transform::invert(src),
            CandidateVariant::Rotate(rotation) => transform::rotate(src, rotation),
        };
        Ok(Cow::Owned(out))
    }
}

#[cfg(feature = "rayon")]
fn adaptive_threshold(
    src: &Surface,
    window: usize,
    c: f32,
    scale: f32,
    parallel: bool,
) -> TrackScanResult<Surface> {
    if parallel {
        transform::parallel::adaptive_threshold_par(src, window, c, scale)
    } else {
        transform::adaptive_threshold(src, window, c, scale)
    }
}

#[cfg(not(feature = "rayon"))]
fn adaptive_threshold(
    src: &Surface,
    window: usize,
    c: f32,
    scale: f32,
    _parallel: bool,
) -> TrackScanResult<Surface> {
    transform::adaptive_threshold(src, window, c, scale)
}

#[cfg(feature = "rayon")]
fn vertical_edges(src: &Surface, scale: f32, parallel: bool) -> TrackScanResult<Surface> {
    if parallel {
        transform::parallel::vertical_edge_enhance_par(src, scale)
    } else {
        transform::vertical_edge_enhance(src, scale)
    }
}

#[cfg(not(feature = "rayon"))]
fn vertical_edges(src: &Surface, scale: f32, _parallel: bool) -> TrackScanResult<Surface> {
    transform::vertical_edge_enhance(src, scale)
}

/// Label with parameters, e.g. `adaptive_threshold(12, 10, 2)`.
impl fmt::Display for CandidateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match *self {
            CandidateVariant::Scale { factor } => write!(f, "{name}({factor})"),
            CandidateVariant::BandCrop { fraction, scale } => {
                write!(f, "{name}({fraction}, {scale})")
            }
            CandidateVariant::FixedCrop { top, height, scale } => {
                write!(f, "{name}({top}, {height}, {scale})")
            }
            CandidateVariant::AdaptiveThreshold { window, c, scale } => {
                write!(f, "{name}({window}, {c}, {scale})")
            }
            CandidateVariant::VerticalEdges { scale } => write!(f, "{name}({scale})"),
            CandidateVariant::GlobalThreshold { threshold, scale } => {
                write!(f, "{name}({threshold}, {scale})")
            }
            CandidateVariant::Rotate(rotation) => write!(f, "rotate({})", rotation.degrees()),
            CandidateVariant::Original
            | CandidateVariant::ContrastStretch
            | CandidateVariant::Sharpen
            | CandidateVariant::Invert => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CandidateVariant, DEFAULT_VARIANTS};
    use crate::surface::Surface;
    use std::borrow::Cow;

    #[test]
    fn original_is_borrowed() {
        let surface = Surface::filled(4, 4, [1, 2, 3, 255]).unwrap();
        let view = CandidateVariant::Original.apply(&surface).unwrap();
        assert!(matches!(view, Cow::Borrowed(_)));
    }

    #[test]
    fn every_default_variant_realizes_on_a_small_frame() {
        let surface = Surface::from_fn(40, 30, |x, y| {
            let v = if (x / 3) % 2 == 0 { 20 } else { 230 };
            [v, v, (y * 8) as u8, 255]
        })
        .unwrap();
        for variant in DEFAULT_VARIANTS.iter() {
            let view = variant.apply(&surface).unwrap();
            assert!(view.width() > 0 && view.height() > 0, "{}", variant.name());
        }
    }

    #[test]
    fn rotations_close_the_list() {
        let names: Vec<_> = DEFAULT_VARIANTS.iter().map(|v| v.name()).collect();
        assert_eq!(names[0], "original");
        assert_eq!(&names[14..], &["rotate_90", "rotate_180", "rotate_270"]);
    }

    #[test]
    fn display_includes_parameters() {
        let labels: Vec<String> = DEFAULT_VARIANTS.iter().map(|v| v.to_string()).collect();
        assert_eq!(labels[1], "scale(1.5)");
        assert_eq!(labels[3], "band_crop(0.35, 2)");
        assert_eq!(labels[6], "adaptive_threshold(12, 10, 2)");
        assert_eq!(labels[13], "invert");
        assert_eq!(&labels[14..], &["rotate(90)", "rotate(180)", "rotate(270)"]);
    }
}
