//! The polling loop for continuous scanning.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::live::session::{ScanReport, ScanSession};
use crate::surface::Surface;
use crate::trace::{trace_event, trace_span};
use crate::util::TrackScanResult;

/// Supplies frames for live scanning.
///
/// `Ok(None)` ends the stream (a replayed recording ran out); `Err` is an
/// image-source failure and ends the session.
pub trait FrameSource {
    fn next_frame(&mut self) -> TrackScanResult<Option<Surface>>;
}

impl<F> FrameSource for F
where
    F: FnMut() -> TrackScanResult<Option<Surface>>,
{
    fn next_frame(&mut self) -> TrackScanResult<Option<Surface>> {
        self()
    }
}

/// Time source for the loop; swapped out in tests.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time with `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Session-scoped stop flag, cheap to clone into another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Live loop settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveConfig {
    /// Pause between the end of one decode pass and the next frame.
    pub interval: Duration,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(400),
        }
    }
}

/// Why the loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    SourceExhausted,
}

/// Counters reported when the loop ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveSummary {
    pub frames: usize,
    pub emissions: usize,
    pub stop: StopReason,
}

/// Single-threaded polling loop.
///
/// Each iteration pulls one frame and runs one full decode pass before the
/// next frame is requested; decode passes never overlap. The cancel token is
/// checked before a frame is pulled and again after its decode, and the
/// stability state is only updated after that second check.
#[derive(Clone, Debug, Default)]
pub struct LiveScanner<C: Clock = SystemClock> {
    clock: C,
    cfg: LiveConfig,
}

impl<C: Clock> LiveScanner<C> {
    pub fn new(clock: C, cfg: LiveConfig) -> Self {
        Self { clock, cfg }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs until cancelled or the source is exhausted.
    ///
    /// The session's stability state is reset on every exit path.
    pub fn run<S, K>(
        &self,
        session: &mut ScanSession,
        source: &mut S,
        token: &CancelToken,
        mut sink: K,
    ) -> TrackScanResult<LiveSummary>
    where
        S: FrameSource + ?Sized,
        K: FnMut(ScanReport),
    {
        let _span = trace_span!("live_loop", interval_ms = self.cfg.interval.as_millis() as u64)
            .entered();

        let mut frames = 0usize;
        let mut emissions = 0usize;
        let stop = loop {
            if token.is_cancelled() {
                break StopReason::Cancelled;
            }
            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break StopReason::SourceExhausted,
                Err(err) => {
                    session.stop();
                    return Err(err);
                }
            };

            let read = session.decode_frame(&frame);
            frames += 1;
            if token.is_cancelled() {
                break StopReason::Cancelled;
            }
            if let Some(report) = session.commit_frame(read, self.clock.now()) {
                emissions += 1;
                sink(report);
            }
            self.clock.sleep(self.cfg.interval);
        };

        session.stop();
        trace_event!("live_stopped", frames = frames, emissions = emissions);
        Ok(LiveSummary {
            frames,
            emissions,
            stop,
        })
    }
}
