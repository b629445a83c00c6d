//! Audio and UI sink boundaries
//!
//! The dispatcher writes to these; it never owns the underlying resources.

use tracing::info;

/// An audio cue resource.
///
/// Both operations are idempotent: ensuring playback of an already-playing
/// cue does nothing, stopping a stopped cue does nothing. Stopping rewinds
/// the playback position so the next start plays from the beginning.
pub trait AlertAudio: Send {
    fn ensure_playing(&mut self);
    fn stop_and_rewind(&mut self);
}

/// Visual alert surface: overlay, countdown, and metric readout.
///
/// Write targets only; the dispatcher owns none of the display state.
pub trait AlertUi: Send {
    fn show_overlay(&mut self);
    fn hide_overlay(&mut self);
    fn set_countdown(&mut self, seconds: u64, danger: bool);
    fn set_metric(&mut self, ear: f64);
}

/// Log-backed audio cue for headless runs and demos
pub struct LogAudio {
    label: &'static str,
    playing: bool,
}

impl LogAudio {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            playing: false,
        }
    }
}

impl AlertAudio for LogAudio {
    fn ensure_playing(&mut self) {
        if !self.playing {
            info!(cue = self.label, "audio cue started");
            self.playing = true;
        }
    }

    fn stop_and_rewind(&mut self) {
        if self.playing {
            info!(cue = self.label, "audio cue stopped and rewound");
            self.playing = false;
        }
    }
}

/// Log-backed UI surface for headless runs and demos
#[derive(Default)]
pub struct LogUi {
    overlay_visible: bool,
}

impl AlertUi for LogUi {
    fn show_overlay(&mut self) {
        if !self.overlay_visible {
            info!("alert overlay shown");
            self.overlay_visible = true;
        }
    }

    fn hide_overlay(&mut self) {
        if self.overlay_visible {
            info!("alert overlay hidden");
            self.overlay_visible = false;
        }
    }

    fn set_countdown(&mut self, seconds: u64, danger: bool) {
        info!(seconds, danger, "countdown updated");
    }

    fn set_metric(&mut self, ear: f64) {
        tracing::debug!(ear = format!("{ear:.2}"), "metric updated");
    }
}
