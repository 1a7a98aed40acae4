//! Live-video scanning: sessions, the stability gate and the polling loop.

pub mod gate;
mod runner;
mod session;

pub use gate::{StabilityConfig, StabilityGate, StabilityState, COOLDOWN, STABLE_FRAMES};
pub use runner::{
    CancelToken, Clock, FrameSource, LiveConfig, LiveScanner, LiveSummary, StopReason,
    SystemClock,
};
pub use session::{ScanReport, ScanSession};
