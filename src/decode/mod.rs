//! Decode orchestration over candidate variants and two backends.
//!
//! For each variant the native detector runs first; if it finds nothing the
//! fallback decoder runs with a baseline hint profile and then once more with
//! a permissive one. The search is strictly sequential and ends at the first
//! decode.

mod backend;
mod orchestrator;
mod variants;

pub use backend::{
    select_symbol, DecodeHints, DecodeMiss, DecodedText, DetectedSymbol, FallbackDecoder,
    NativeDetector,
};
pub use orchestrator::{
    Backend, DecodeAttemptResult, DecodeOrchestrator, NoResult, OrchestratorConfig,
};
pub use variants::{CandidateVariant, DEFAULT_VARIANTS};
