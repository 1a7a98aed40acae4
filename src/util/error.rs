//! Error types for trackscan.

use thiserror::Error;

/// Result alias for trackscan operations.
pub type TrackScanResult<T> = std::result::Result<T, TrackScanError>;

/// Errors that can occur when building surfaces, running transforms, or
/// pulling frames from an image source.
///
/// Decode misses are not errors; see [`crate::decode::DecodeMiss`] and
/// [`crate::decode::NoResult`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackScanError {
    /// Width or height is zero or overflows the address space.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The pixel buffer length does not match `width * height * 4`.
    #[error("pixel buffer has {got} bytes, expected {needed}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// A crop region does not fit inside the source surface.
    #[error(
        "region x={x} y={y} {width}x{height} exceeds surface {img_width}x{img_height}"
    )]
    RegionOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image decoding or encoding failed.
    #[error("image I/O error: {reason}")]
    ImageIo { reason: String },
    /// The image source could not deliver a frame.
    #[error("image source failed: {reason}")]
    Source { reason: String },
}
