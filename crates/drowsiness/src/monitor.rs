//! Drowsiness state machine
//!
//! Tracks how long the eyes have remained continuously closed and escalates
//! Ok -> Warning -> Emergency off elapsed duration, not frame counts, so
//! behavior is independent of the camera frame rate. The emergency event is
//! one-shot per closure episode; the only way back to Ok is an open frame.

use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::classifier::EyeClass;
use crate::config::DetectionConfig;

/// Alertness state, owned exclusively by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertState {
    #[default]
    Ok,
    Warning,
    Emergency,
}

/// Transition events emitted toward the dispatcher.
///
/// Emitted on entry only, never per frame while a state persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    WarningEntered,
    EmergencyEntered,
    Recovered,
}

/// Per-frame evidence consumed by the state machine.
///
/// A frame with no detected face is neither open nor closed: the previous
/// state and episode are held unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Eyes(EyeClass),
    NoFace,
}

/// The drowsiness state machine.
///
/// A closure episode starts on the first closed frame after an open one and
/// is destroyed the instant a frame classifies the eyes as open; its duration
/// is monotonically non-decreasing while active and exactly zero otherwise.
#[derive(Debug)]
pub struct DrowsinessMonitor {
    config: DetectionConfig,
    state: AlertState,
    episode_start: Option<Instant>,
    emergency_fired: bool,
}

impl DrowsinessMonitor {
    /// Create a monitor in the Ok state with no active episode
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            state: AlertState::Ok,
            episode_start: None,
            emergency_fired: false,
        }
    }

    /// Current alert state
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Elapsed duration of the active closure episode, if any.
    ///
    /// Saturating: a timestamp earlier than the episode start reads as zero,
    /// never negative.
    pub fn episode_elapsed(&self, now: Instant) -> Option<Duration> {
        self.episode_start
            .map(|start| now.saturating_duration_since(start))
    }

    /// Consume one frame's observation at the given timestamp.
    ///
    /// Returns the transition events this frame produced, in escalation
    /// order. A sparse frame sequence can cross both thresholds at once, in
    /// which case Warning entry precedes Emergency entry.
    pub fn update(&mut self, observation: Observation, now: Instant) -> Vec<StateEvent> {
        match observation {
            Observation::NoFace => Vec::new(),
            Observation::Eyes(EyeClass::Open) => self.on_open(),
            Observation::Eyes(EyeClass::Closed) => self.on_closed(now),
        }
    }

    fn on_open(&mut self) -> Vec<StateEvent> {
        let mut events = Vec::new();
        if self.state != AlertState::Ok {
            info!(from = ?self.state, "eyes reopened, alert cleared");
            events.push(StateEvent::Recovered);
        }
        self.state = AlertState::Ok;
        self.episode_start = None;
        self.emergency_fired = false;
        events
    }

    fn on_closed(&mut self, now: Instant) -> Vec<StateEvent> {
        let start = *self.episode_start.get_or_insert_with(|| {
            debug!("closure episode started");
            now
        });
        let duration = now.saturating_duration_since(start);

        let mut events = Vec::new();
        if self.state == AlertState::Ok && duration >= self.config.warning_duration() {
            info!(closed_ms = duration.as_millis() as u64, "entering Warning");
            self.state = AlertState::Warning;
            events.push(StateEvent::WarningEntered);
        }
        if !self.emergency_fired && duration >= self.config.emergency_duration() {
            info!(closed_ms = duration.as_millis() as u64, "entering Emergency");
            self.state = AlertState::Emergency;
            self.emergency_fired = true;
            events.push(StateEvent::EmergencyEntered);
        }
        events
    }

    /// Return to Ok with no active episode; a subsequent start begins clean
    pub fn reset(&mut self) {
        self.state = AlertState::Ok;
        self.episode_start = None;
        self.emergency_fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> DrowsinessMonitor {
        DrowsinessMonitor::new(DetectionConfig::default())
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    const OPEN: Observation = Observation::Eyes(EyeClass::Open);
    const CLOSED: Observation = Observation::Eyes(EyeClass::Closed);

    #[test]
    fn test_short_closure_never_leaves_ok() {
        let mut m = monitor();
        let t0 = Instant::now();
        // Closed for 900 ms at a high frame rate
        for i in 0..10 {
            let events = m.update(CLOSED, t0 + Duration::from_millis(i * 90));
            assert!(events.is_empty());
            assert_eq!(m.state(), AlertState::Ok);
        }
    }

    #[test]
    fn test_warning_after_threshold() {
        let mut m = monitor();
        let t0 = Instant::now();
        assert!(m.update(CLOSED, t0).is_empty());
        let events = m.update(CLOSED, t0 + secs(1));
        assert_eq!(events, vec![StateEvent::WarningEntered]);
        assert_eq!(m.state(), AlertState::Warning);
        // Remaining in Warning emits nothing further
        assert!(m.update(CLOSED, t0 + secs(2)).is_empty());
    }

    #[test]
    fn test_exactly_one_emergency_per_episode() {
        let mut m = monitor();
        let t0 = Instant::now();
        let mut emergencies = 0;
        // Closed continuously for 20 s at 10 fps
        for i in 0..200 {
            let events = m.update(CLOSED, t0 + Duration::from_millis(i * 100));
            emergencies += events
                .iter()
                .filter(|e| **e == StateEvent::EmergencyEntered)
                .count();
        }
        assert_eq!(emergencies, 1);
        assert_eq!(m.state(), AlertState::Emergency);
    }

    #[test]
    fn test_open_resets_and_allows_second_emergency() {
        let mut m = monitor();
        let t0 = Instant::now();
        m.update(CLOSED, t0);
        m.update(CLOSED, t0 + secs(6));
        assert_eq!(m.state(), AlertState::Emergency);

        // A single open frame clears everything
        let events = m.update(OPEN, t0 + secs(7));
        assert_eq!(events, vec![StateEvent::Recovered]);
        assert_eq!(m.state(), AlertState::Ok);
        assert_eq!(m.episode_elapsed(t0 + secs(7)), None);

        // An independent closed run fires a second, distinct emergency
        m.update(CLOSED, t0 + secs(8));
        let events = m.update(CLOSED, t0 + secs(14));
        assert!(events.contains(&StateEvent::EmergencyEntered));
    }

    #[test]
    fn test_repeated_open_emits_recovered_once() {
        let mut m = monitor();
        let t0 = Instant::now();
        m.update(CLOSED, t0);
        m.update(CLOSED, t0 + secs(2));
        assert_eq!(m.update(OPEN, t0 + secs(3)), vec![StateEvent::Recovered]);
        assert!(m.update(OPEN, t0 + secs(4)).is_empty());
        assert!(m.update(OPEN, t0 + secs(5)).is_empty());
    }

    #[test]
    fn test_no_face_holds_state_and_episode() {
        let mut m = monitor();
        let t0 = Instant::now();
        m.update(CLOSED, t0);
        m.update(CLOSED, t0 + secs(2));
        assert_eq!(m.state(), AlertState::Warning);

        // Losing the face is no evidence either way
        assert!(m.update(Observation::NoFace, t0 + secs(3)).is_empty());
        assert_eq!(m.state(), AlertState::Warning);
        assert_eq!(m.episode_elapsed(t0 + secs(3)), Some(secs(3)));
    }

    #[test]
    fn test_sparse_frames_cross_both_thresholds_in_order() {
        let mut m = monitor();
        let t0 = Instant::now();
        m.update(CLOSED, t0);
        // Next frame arrives 6 s later: both transitions, escalation order
        let events = m.update(CLOSED, t0 + secs(6));
        assert_eq!(
            events,
            vec![StateEvent::WarningEntered, StateEvent::EmergencyEntered]
        );
    }

    #[test]
    fn test_clock_skew_clamps_to_zero() {
        let mut m = monitor();
        let t0 = Instant::now() + secs(10);
        m.update(CLOSED, t0);
        // A frame stamped before the episode start must not panic or escalate
        let events = m.update(CLOSED, t0 - secs(5));
        assert!(events.is_empty());
        assert_eq!(m.episode_elapsed(t0 - secs(5)), Some(Duration::ZERO));
    }

    #[test]
    fn test_reset_returns_clean_state() {
        let mut m = monitor();
        let t0 = Instant::now();
        m.update(CLOSED, t0);
        m.update(CLOSED, t0 + secs(6));
        m.reset();
        assert_eq!(m.state(), AlertState::Ok);
        assert_eq!(m.episode_elapsed(t0 + secs(7)), None);
        // The emergency one-shot is armed again after reset
        m.update(CLOSED, t0 + secs(8));
        let events = m.update(CLOSED, t0 + secs(14));
        assert!(events.contains(&StateEvent::EmergencyEntered));
    }

    /// EAR sequence [0.30, 0.30, 0.15, 0.15, 0.15, 0.15, 0.30] sampled at
    /// 1 s intervals with the default thresholds.
    #[test]
    fn test_scenario_brief_closure_recovers_before_emergency() {
        use crate::classifier::classify_eyes;

        let mut m = monitor();
        let t0 = Instant::now();
        let samples = [0.30, 0.30, 0.15, 0.15, 0.15, 0.15, 0.30];
        let expected = [
            AlertState::Ok,
            AlertState::Ok,
            AlertState::Ok,
            AlertState::Warning,
            AlertState::Warning,
            AlertState::Warning,
            AlertState::Ok,
        ];
        for (i, (ear, want)) in samples.iter().zip(expected).enumerate() {
            let class = classify_eyes(*ear, 0.22);
            m.update(Observation::Eyes(class), t0 + secs(i as u64));
            assert_eq!(m.state(), want, "state mismatch at t={i}s");
        }
    }

    proptest::proptest! {
        /// Emergencies never outnumber closure episodes, and any open final
        /// frame leaves the machine in Ok with no active episode.
        #[test]
        fn emergency_count_bounded_by_episodes(
            frames in proptest::collection::vec(proptest::bool::ANY, 1..200)
        ) {
            let mut m = monitor();
            let t0 = Instant::now();
            let mut emergencies = 0;
            let mut episodes = 0;
            let mut prev_closed = false;
            for (i, closed) in frames.iter().enumerate() {
                if *closed && !prev_closed {
                    episodes += 1;
                }
                prev_closed = *closed;
                let obs = if *closed { CLOSED } else { OPEN };
                let events = m.update(obs, t0 + Duration::from_millis(i as u64 * 700));
                emergencies += events
                    .iter()
                    .filter(|e| **e == StateEvent::EmergencyEntered)
                    .count();
            }
            proptest::prop_assert!(emergencies <= episodes);
            if !prev_closed {
                proptest::prop_assert_eq!(m.state(), AlertState::Ok);
                proptest::prop_assert_eq!(
                    m.episode_elapsed(t0 + Duration::from_secs(300)),
                    None
                );
            }
        }
    }

    /// EAR held at 0.10 for 6 consecutive 1 s samples: Warning from t=1,
    /// Emergency at t=5, exactly one emergency event.
    #[test]
    fn test_scenario_sustained_closure_escalates_once() {
        use crate::classifier::classify_eyes;

        let mut m = monitor();
        let t0 = Instant::now();
        let mut emergencies = 0;
        let expected = [
            AlertState::Ok,
            AlertState::Warning,
            AlertState::Warning,
            AlertState::Warning,
            AlertState::Warning,
            AlertState::Emergency,
        ];
        for (i, want) in expected.iter().enumerate() {
            let class = classify_eyes(0.10, 0.22);
            let events = m.update(Observation::Eyes(class), t0 + secs(i as u64));
            emergencies += events
                .iter()
                .filter(|e| **e == StateEvent::EmergencyEntered)
                .count();
            assert_eq!(m.state(), *want, "state mismatch at t={i}s");
        }
        assert_eq!(emergencies, 1);
    }
}
