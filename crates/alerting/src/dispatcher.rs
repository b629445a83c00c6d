//! Alert dispatcher
//!
//! Consumes transition events plus a 1 Hz tick. Tracks the last dispatched
//! state so re-entering a state never restarts audio that is already playing
//! and returning to Ok tears down side effects exactly once.

use std::time::Duration;
use tracing::debug;

use drowsiness::{AlertState, StateEvent};

use crate::sink::{AlertAudio, AlertUi};

/// Dispatches UI and audio side effects for alert state transitions
pub struct AlertDispatcher {
    caution: Box<dyn AlertAudio>,
    urgent: Box<dyn AlertAudio>,
    ui: Box<dyn AlertUi>,
    danger_after_seconds: u64,
    dispatched: AlertState,
}

impl AlertDispatcher {
    /// Create a dispatcher over the given cue and UI sinks
    pub fn new(
        caution: Box<dyn AlertAudio>,
        urgent: Box<dyn AlertAudio>,
        ui: Box<dyn AlertUi>,
        danger_after_seconds: u64,
    ) -> Self {
        Self {
            caution,
            urgent,
            ui,
            danger_after_seconds,
            dispatched: AlertState::Ok,
        }
    }

    /// The alert state last dispatched to the sinks
    pub fn dispatched_state(&self) -> AlertState {
        self.dispatched
    }

    /// React to one transition event
    pub fn handle(&mut self, event: StateEvent) {
        match event {
            StateEvent::WarningEntered => {
                if self.dispatched != AlertState::Ok {
                    return;
                }
                self.caution.ensure_playing();
                self.ui.show_overlay();
                self.ui.set_countdown(0, false);
                self.dispatched = AlertState::Warning;
            }
            StateEvent::EmergencyEntered => {
                if self.dispatched == AlertState::Emergency {
                    return;
                }
                // A sparse frame can skip the Warning entry; the overlay and
                // cautionary cue still come up on the way to Emergency.
                if self.dispatched == AlertState::Ok {
                    self.caution.ensure_playing();
                    self.ui.show_overlay();
                }
                self.urgent.ensure_playing();
                self.dispatched = AlertState::Emergency;
            }
            StateEvent::Recovered => self.teardown(),
        }
    }

    /// 1 Hz countdown update while an alert is active.
    ///
    /// The visible countdown tracks the actual closure-episode duration, it
    /// is not an independent counter that can drift.
    pub fn tick(&mut self, episode_elapsed: Option<Duration>) {
        if self.dispatched == AlertState::Ok {
            return;
        }
        let seconds = episode_elapsed.map_or(0, |d| d.as_secs());
        self.ui
            .set_countdown(seconds, seconds >= self.danger_after_seconds);
    }

    /// Push the latest EAR readout to the UI
    pub fn metric(&mut self, ear: f64) {
        self.ui.set_metric(ear);
    }

    /// Stop all alert side effects; used on session stop
    pub fn reset(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.dispatched == AlertState::Ok {
            return;
        }
        debug!(from = ?self.dispatched, "tearing down alert side effects");
        self.caution.stop_and_rewind();
        self.urgent.stop_and_rewind();
        self.ui.hide_overlay();
        self.ui.set_countdown(0, false);
        self.dispatched = AlertState::Ok;
    }
}
