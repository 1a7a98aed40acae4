//! Consecutive-frame voting with a re-emission cooldown.

use crate::tracking::TrackingMatch;
use std::time::{Duration, Instant};

/// Frames in a row that must agree before a candidate is trusted.
pub const STABLE_FRAMES: u32 = 3;
/// How long an identical candidate is suppressed after emission.
pub const COOLDOWN: Duration = Duration::from_millis(900);

/// Tunables for [`StabilityGate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StabilityConfig {
    pub stable_frames: u32,
    pub cooldown: Duration,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            stable_frames: STABLE_FRAMES,
            cooldown: COOLDOWN,
        }
    }
}

/// Mutable voting state; only [`StabilityGate::evaluate`] changes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StabilityState {
    pub previous_candidate: Option<String>,
    pub streak: u32,
    pub last_emitted: Option<String>,
    pub cooldown_until: Option<Instant>,
}

/// Debounces frame-by-frame reads in live scanning.
///
/// A candidate is emitted once the same number has been read on
/// `stable_frames` consecutive non-empty frames. The same number is then held
/// back until the cooldown has elapsed, while a different stable number may
/// interrupt the cooldown at once.
#[derive(Clone, Debug, Default)]
pub struct StabilityGate {
    cfg: StabilityConfig,
    state: StabilityState,
}

impl StabilityGate {
    pub fn new(cfg: StabilityConfig) -> Self {
        Self {
            cfg,
            state: StabilityState::default(),
        }
    }

    /// Returns the current voting state.
    pub fn state(&self) -> &StabilityState {
        &self.state
    }

    /// Returns the gate configuration.
    pub fn config(&self) -> StabilityConfig {
        self.cfg
    }

    /// Feeds one frame's extraction result; returns the match if it is emitted.
    pub fn evaluate(
        &mut self,
        frame: Option<&TrackingMatch>,
        now: Instant,
    ) -> Option<TrackingMatch> {
        let Some(tracking) = frame else {
            self.state.streak = 0;
            self.state.previous_candidate = None;
            return None;
        };

        let candidate = tracking.number.as_str();
        if self.state.previous_candidate.as_deref() == Some(candidate) {
            self.state.streak = self.state.streak.saturating_add(1);
        } else {
            self.state.previous_candidate = Some(candidate.to_string());
            self.state.streak = 1;
        }

        if self.state.streak < self.cfg.stable_frames {
            return None;
        }
        let is_new = self.state.last_emitted.as_deref() != Some(candidate);
        let cooled = self.state.cooldown_until.map_or(true, |until| now > until);
        if !(is_new || cooled) {
            return None;
        }

        self.state.last_emitted = Some(candidate.to_string());
        self.state.cooldown_until = Some(now + self.cfg.cooldown);
        Some(tracking.clone())
    }

    /// Clears all state, as on session stop.
    pub fn reset(&mut self) {
        self.state = StabilityState::default();
    }
}
