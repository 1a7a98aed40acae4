//! trackscan turns noisy barcode images into validated shipment tracking numbers.
//!
//! The crate is the decode pipeline only: deterministic surface transforms
//! produce alternative views of a frame, a [`DecodeOrchestrator`] tries two
//! pluggable backends against those views in a fixed order, the tracking
//! extractor maps decoded text to a carrier-tagged number, and a
//! [`StabilityGate`] debounces frame-by-frame reads in live mode. The barcode
//! decoders themselves are supplied by the caller through the
//! [`NativeDetector`] and [`FallbackDecoder`] traits.

pub mod band;
pub mod decode;
pub mod live;
pub mod lowlevel;
pub mod surface;
mod trace;
pub mod tracking;
pub mod transform;
pub mod util;

#[cfg(feature = "image-io")]
pub use surface::io;

pub use band::{detect_band, BandRegion};
pub use decode::{
    Backend, CandidateVariant, DecodeAttemptResult, DecodeHints, DecodeMiss, DecodeOrchestrator,
    DecodedText, DetectedSymbol, FallbackDecoder, NativeDetector, NoResult, OrchestratorConfig,
    DEFAULT_VARIANTS,
};
pub use live::{
    CancelToken, Clock, FrameSource, LiveConfig, LiveScanner, LiveSummary, ScanReport,
    ScanSession, StabilityConfig, StabilityGate, StopReason, SystemClock,
};
pub use surface::{CropRect, Surface};
pub use tracking::{extract_tracking, Carrier, TrackingMatch};
pub use transform::Rotation;
pub use util::{TrackScanError, TrackScanResult};
