//! Capability contracts for the two decode backends.
//!
//! Both backends are opaque: the orchestrator only sees request/response
//! calls. Closures with the right signature implement the traits directly,
//! which keeps adapters and test doubles short.

use crate::surface::Surface;
use thiserror::Error;

/// One symbol reported by the native detector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectedSymbol {
    pub text: String,
    /// Symbology name as reported by the platform (e.g. `code_128`).
    pub format_hint: String,
}

impl DetectedSymbol {
    pub fn new(text: impl Into<String>, format_hint: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format_hint: format_hint.into(),
        }
    }
}

/// Text produced by the fallback decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
}

/// Search hints understood by the fallback decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeHints {
    /// Exhaustive search instead of the fast path.
    pub try_harder: bool,
    /// Also test the color-inverted surface.
    pub also_inverted: bool,
    /// Assume the symbol fills the frame.
    pub pure_barcode: bool,
}

impl DecodeHints {
    /// First profile tried on every variant.
    pub const BASELINE: DecodeHints = DecodeHints {
        try_harder: true,
        also_inverted: false,
        pure_barcode: false,
    };

    /// Retry profile used when the baseline misses.
    pub const PERMISSIVE: DecodeHints = DecodeHints {
        try_harder: true,
        also_inverted: true,
        pure_barcode: false,
    };
}

/// Recoverable backend outcome meaning "nothing decoded here".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeMiss {
    #[error("no symbol found")]
    NotFound,
    #[error("unsupported by backend: {0}")]
    Unsupported(String),
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Platform barcode detector, tried first on every variant.
pub trait NativeDetector {
    /// Returns every symbol found, possibly none.
    fn detect(&mut self, surface: &Surface) -> Result<Vec<DetectedSymbol>, DecodeMiss>;
}

/// General-purpose decoder with configurable hints.
pub trait FallbackDecoder {
    fn decode(&mut self, surface: &Surface, hints: &DecodeHints)
        -> Result<DecodedText, DecodeMiss>;
}

impl<F> NativeDetector for F
where
    F: FnMut(&Surface) -> Result<Vec<DetectedSymbol>, DecodeMiss>,
{
    fn detect(&mut self, surface: &Surface) -> Result<Vec<DetectedSymbol>, DecodeMiss> {
        self(surface)
    }
}

impl<F> FallbackDecoder for F
where
    F: FnMut(&Surface, &DecodeHints) -> Result<DecodedText, DecodeMiss>,
{
    fn decode(
        &mut self,
        surface: &Surface,
        hints: &DecodeHints,
    ) -> Result<DecodedText, DecodeMiss> {
        self(surface, hints)
    }
}

/// Picks the symbol to report from a native detection.
///
/// Amazon `TBA<digits>` payloads win regardless of length (case-insensitive);
/// otherwise the longest text wins and ties keep the earlier symbol.
pub fn select_symbol(symbols: &[DetectedSymbol]) -> Option<&DetectedSymbol> {
    if let Some(amazon) = symbols.iter().find(|s| is_tba_prefixed(&s.text)) {
        return Some(amazon);
    }
    let mut best: Option<&DetectedSymbol> = None;
    for symbol in symbols {
        let longer = best.map_or(true, |b| {
            symbol.text.chars().count() > b.text.chars().count()
        });
        if longer {
            best = Some(symbol);
        }
    }
    best
}

fn is_tba_prefixed(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() > 3 && bytes[..3].eq_ignore_ascii_case(b"TBA") && bytes[3].is_ascii_digit()
}
