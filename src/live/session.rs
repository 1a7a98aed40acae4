//! Scan sessions: the explicit owner of backends and stability state.

use std::time::Instant;

use crate::decode::{Backend, CandidateVariant, DecodeOrchestrator, NoResult};
use crate::live::gate::{StabilityConfig, StabilityGate};
use crate::surface::Surface;
use crate::trace::{trace_event, trace_span};
use crate::tracking::{extract_tracking, TrackingMatch};

/// What the result consumer receives.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanReport {
    pub raw_text: String,
    pub tracking: Option<TrackingMatch>,
    pub variant: CandidateVariant,
    pub backend: Backend,
}

/// One scanning session.
///
/// Owns the decode backends (through the orchestrator) and the live-mode
/// stability state. Nothing is process-global; dropping the session drops
/// everything.
pub struct ScanSession {
    orchestrator: DecodeOrchestrator,
    gate: StabilityGate,
}

impl ScanSession {
    pub fn new(orchestrator: DecodeOrchestrator) -> Self {
        Self {
            orchestrator,
            gate: StabilityGate::default(),
        }
    }

    /// Replaces the stability gate configuration, clearing its state.
    pub fn with_stability(mut self, cfg: StabilityConfig) -> Self {
        self.gate = StabilityGate::new(cfg);
        self
    }

    pub fn orchestrator(&self) -> &DecodeOrchestrator {
        &self.orchestrator
    }

    pub fn gate(&self) -> &StabilityGate {
        &self.gate
    }

    /// Single-shot scan for file or crop mode; every decode is reported.
    pub fn scan(&mut self, surface: &Surface) -> Result<ScanReport, NoResult> {
        let attempt = self.orchestrator.attempt_decode(surface)?;
        let tracking = extract_tracking(&attempt.text);
        Ok(ScanReport {
            raw_text: attempt.text,
            tracking,
            variant: attempt.variant,
            backend: attempt.backend,
        })
    }

    /// Decodes a live frame without touching the stability state.
    pub fn decode_frame(&mut self, surface: &Surface) -> Option<ScanReport> {
        self.scan(surface).ok()
    }

    /// Feeds a decoded frame to the stability gate; returns the report on emission.
    pub fn commit_frame(&mut self, read: Option<ScanReport>, now: Instant) -> Option<ScanReport> {
        let tracking = read.as_ref().and_then(|report| report.tracking.as_ref());
        let emitted = self.gate.evaluate(tracking, now)?;
        trace_event!(
            "stable_emit",
            carrier = emitted.carrier.name(),
            number = emitted.number.as_str()
        );
        read
    }

    /// Decode and commit in one step.
    pub fn live_tick(&mut self, surface: &Surface, now: Instant) -> Option<ScanReport> {
        let _span = trace_span!("live_tick").entered();
        let read = self.decode_frame(surface);
        self.commit_frame(read, now)
    }

    /// Ends live scanning and clears the stability state.
    pub fn stop(&mut self) {
        self.gate.reset();
    }
}
