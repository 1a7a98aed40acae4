//! Sequential variant x backend search.

use crate::decode::backend::{select_symbol, DecodeHints, FallbackDecoder, NativeDetector};
use crate::decode::variants::{CandidateVariant, DEFAULT_VARIANTS};
use crate::surface::Surface;
use crate::trace::{trace_debug, trace_event, trace_span};
use thiserror::Error;

/// Backend that produced a decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Native,
    Fallback,
}

/// Successful decode of one variant.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodeAttemptResult {
    pub text: String,
    pub variant: CandidateVariant,
    pub backend: Backend,
    /// Number of variants tried, including the successful one.
    pub attempts: usize,
}

/// Every variant and backend missed. This is a normal outcome, not a fault.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("no barcode decoded after {attempts} variant attempts")]
pub struct NoResult {
    pub attempts: usize,
}

/// Configuration for the decode search.
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Variants in the order they are tried.
    pub variants: Vec<CandidateVariant>,
    /// Hints for the first fallback call on each variant.
    pub baseline_hints: DecodeHints,
    /// Hints for the single fallback retry.
    pub permissive_hints: DecodeHints,
    /// Use row-parallel neighborhood transforms (requires `rayon`).
    pub parallel: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            variants: DEFAULT_VARIANTS.to_vec(),
            baseline_hints: DecodeHints::BASELINE,
            permissive_hints: DecodeHints::PERMISSIVE,
            parallel: false,
        }
    }
}

/// Drives the native and fallback backends over the candidate variants.
///
/// Variants are realized and tried one at a time; the first decode ends the
/// search. A missing native detector is a platform fact and simply skips that
/// step for every variant.
pub struct DecodeOrchestrator {
    native: Option<Box<dyn NativeDetector>>,
    fallback: Box<dyn FallbackDecoder>,
    cfg: OrchestratorConfig,
}

impl DecodeOrchestrator {
    /// Creates an orchestrator with only a fallback decoder.
    pub fn new<F>(fallback: F) -> Self
    where
        F: FallbackDecoder + 'static,
    {
        Self {
            native: None,
            fallback: Box::new(fallback),
            cfg: OrchestratorConfig::default(),
        }
    }

    /// Adds a native detector, tried before the fallback on each variant.
    pub fn with_native<N>(mut self, native: N) -> Self
    where
        N: NativeDetector + 'static,
    {
        self.native = Some(Box::new(native));
        self
    }

    /// Replaces the search configuration.
    pub fn with_config(mut self, cfg: OrchestratorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.cfg
    }

    /// Returns true when a native detector is installed.
    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }

    /// Tries every variant in order until a backend yields text.
    pub fn attempt_decode(&mut self, src: &Surface) -> Result<DecodeAttemptResult, NoResult> {
        let _span = trace_span!(
            "decode_attempt",
            width = src.width(),
            height = src.height(),
            variants = self.cfg.variants.len()
        )
        .entered();

        let mut attempts = 0usize;
        for idx in 0..self.cfg.variants.len() {
            let variant = self.cfg.variants[idx];
            attempts += 1;
            if let Some((text, backend)) = self.try_variant(src, variant) {
                trace_event!(
                    "decoded",
                    variant = variant.name(),
                    native = backend == Backend::Native,
                    attempts = attempts
                );
                return Ok(DecodeAttemptResult {
                    text,
                    variant,
                    backend,
                    attempts,
                });
            }
        }

        trace_event!("exhausted", attempts = attempts);
        Err(NoResult { attempts })
    }

    fn try_variant(&mut self, src: &Surface, variant: CandidateVariant) -> Option<(String, Backend)> {
        let _span = trace_span!("variant", name = variant.name()).entered();

        let view = match variant.apply_with(src, self.cfg.parallel) {
            Ok(view) => view,
            Err(err) => {
                let reason = err.to_string();
                trace_debug!("variant_unrealizable", reason = reason.as_str());
                return None;
            }
        };

        if let Some(native) = self.native.as_mut() {
            match native.detect(&view) {
                Ok(symbols) => {
                    if let Some(symbol) = select_symbol(&symbols) {
                        return Some((symbol.text.clone(), Backend::Native));
                    }
                }
                Err(miss) => {
                    let reason = miss.to_string();
                    trace_debug!("native_miss", reason = reason.as_str());
                }
            }
        }

        for hints in [self.cfg.baseline_hints, self.cfg.permissive_hints] {
            match self.fallback.decode(&view, &hints) {
                Ok(decoded) => return Some((decoded.text, Backend::Fallback)),
                Err(miss) => {
                    let reason = miss.to_string();
                    trace_debug!(
                        "fallback_miss",
                        also_inverted = hints.also_inverted,
                        reason = reason.as_str()
                    );
                }
            }
        }
        None
    }
}
