use std::time::{Duration, Instant};

use trackscan::live::{StabilityState, COOLDOWN, STABLE_FRAMES};
use trackscan::{Carrier, StabilityConfig, StabilityGate, TrackingMatch};

fn read(number: &str) -> Option<TrackingMatch> {
    Some(TrackingMatch {
        carrier: Carrier::Dhl,
        number: number.to_string(),
    })
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn defaults_are_three_frames_and_900ms() {
    assert_eq!(STABLE_FRAMES, 3);
    assert_eq!(COOLDOWN, ms(900));
    assert_eq!(
        StabilityConfig::default(),
        StabilityConfig {
            stable_frames: 3,
            cooldown: ms(900),
        }
    );
}

#[test]
fn emits_once_on_third_consecutive_read() {
    let mut gate = StabilityGate::default();
    let t0 = Instant::now();
    let frames = [None, read("A"), read("A"), read("A"), read("A")];
    let mut emitted = Vec::new();
    for (idx, frame) in frames.iter().enumerate() {
        let now = t0 + ms(100 * idx as u64);
        if let Some(tracking) = gate.evaluate(frame.as_ref(), now) {
            emitted.push((idx, tracking.number));
        }
    }
    assert_eq!(emitted, vec![(3, "A".to_string())]);
}

#[test]
fn cooldown_blocks_repeat_but_not_a_new_candidate() {
    let mut gate = StabilityGate::default();
    let t0 = Instant::now();
    assert!(gate.evaluate(read("A").as_ref(), t0).is_none());
    assert!(gate.evaluate(read("A").as_ref(), t0 + ms(100)).is_none());
    let emitted = gate.evaluate(read("A").as_ref(), t0 + ms(200)).unwrap();
    assert_eq!(emitted.number, "A");

    assert!(gate.evaluate(read("A").as_ref(), t0 + ms(700)).is_none());

    assert!(gate.evaluate(read("B").as_ref(), t0 + ms(700)).is_none());
    assert!(gate.evaluate(read("B").as_ref(), t0 + ms(700)).is_none());
    let emitted = gate.evaluate(read("B").as_ref(), t0 + ms(700)).unwrap();
    assert_eq!(emitted.number, "B");
    assert_eq!(gate.state().last_emitted.as_deref(), Some("B"));
    assert_eq!(gate.state().cooldown_until, Some(t0 + ms(1600)));
}

#[test]
fn same_candidate_re_emits_strictly_after_cooldown() {
    let mut gate = StabilityGate::default();
    let t0 = Instant::now();
    for step in 0..3 {
        gate.evaluate(read("A").as_ref(), t0 + ms(step));
    }
    assert_eq!(gate.state().cooldown_until, Some(t0 + ms(902)));

    assert!(gate.evaluate(read("A").as_ref(), t0 + ms(902)).is_none());
    let again = gate.evaluate(read("A").as_ref(), t0 + ms(903));
    assert_eq!(again.map(|t| t.number), Some("A".to_string()));
}

#[test]
fn empty_frame_breaks_the_streak() {
    let mut gate = StabilityGate::default();
    let t0 = Instant::now();
    let frames = [read("A"), read("A"), None, read("A"), read("A")];
    for frame in &frames {
        assert!(gate.evaluate(frame.as_ref(), t0).is_none());
    }
    assert_eq!(gate.state().streak, 2);
    assert!(gate.evaluate(read("A").as_ref(), t0).is_some());
}

#[test]
fn alternating_candidates_never_stabilize() {
    let mut gate = StabilityGate::default();
    let t0 = Instant::now();
    for idx in 0..10u64 {
        let number = if idx % 2 == 0 { "A" } else { "B" };
        assert!(gate.evaluate(read(number).as_ref(), t0 + ms(idx)).is_none());
    }
    assert_eq!(gate.state().streak, 1);
}

#[test]
fn reset_clears_everything() {
    let mut gate = StabilityGate::new(StabilityConfig {
        stable_frames: 1,
        cooldown: ms(50),
    });
    let t0 = Instant::now();
    assert!(gate.evaluate(read("A").as_ref(), t0).is_some());
    assert_ne!(*gate.state(), StabilityState::default());
    gate.reset();
    assert_eq!(*gate.state(), StabilityState::default());
    assert!(gate.evaluate(read("A").as_ref(), t0).is_some());
}
