//! Yawn detection
//!
//! Duration-gated like the eye path: a mouth held over the MAR threshold for
//! the hold duration fires one event per mouth episode, reset when the mouth
//! returns to normal.

use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::classifier::MouthClass;

/// Sustained-yawn detector with one event per yawn episode
#[derive(Debug)]
pub struct YawnDetector {
    hold: Duration,
    episode_start: Option<Instant>,
    fired: bool,
}

impl YawnDetector {
    /// Create a detector that fires after `hold` of continuous yawning
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            episode_start: None,
            fired: false,
        }
    }

    /// Consume one frame's mouth classification.
    ///
    /// Returns true exactly once per episode, when the hold duration elapses.
    pub fn update(&mut self, mouth: MouthClass, now: Instant) -> bool {
        match mouth {
            MouthClass::Normal => {
                if self.episode_start.take().is_some() {
                    debug!("yawn episode ended");
                }
                self.fired = false;
                false
            }
            MouthClass::Yawning => {
                let start = *self.episode_start.get_or_insert(now);
                let duration = now.saturating_duration_since(start);
                if !self.fired && duration >= self.hold {
                    info!(held_ms = duration.as_millis() as u64, "sustained yawn detected");
                    self.fired = true;
                    return true;
                }
                false
            }
        }
    }

    /// Clear any active yawn episode
    pub fn reset(&mut self) {
        self.episode_start = None;
        self.fired = false;
    }
}
