//! Detection configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Only the first face of the producer's result list is tracked.
pub const MAX_TRACKED_FACES: usize = 1;

/// Configuration validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("eye_closed_threshold must be within (0, 1), got {0}")]
    EyeThresholdOutOfRange(f64),

    #[error("yawn_threshold must be positive, got {0}")]
    YawnThresholdOutOfRange(f64),

    #[error("warning_duration_ms ({0}) must be below emergency_duration_ms ({1})")]
    DurationOrdering(u64, u64),
}

/// Detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// EAR below this classifies the frame as eyes closed
    pub eye_closed_threshold: f64,

    /// MAR above this classifies the frame as yawning
    pub yawn_threshold: f64,

    /// Continuous closure before the Warning state (milliseconds)
    pub warning_duration_ms: u64,

    /// Continuous closure before the Emergency state (milliseconds)
    pub emergency_duration_ms: u64,

    /// Sustained yawn duration before a yawn event fires (milliseconds)
    pub yawn_hold_ms: u64,

    /// Countdown seconds after which the display switches to danger coloring
    pub countdown_danger_seconds: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            eye_closed_threshold: 0.22,
            yawn_threshold: 0.50,
            warning_duration_ms: 1000,
            emergency_duration_ms: 5000,
            yawn_hold_ms: 2000,
            countdown_danger_seconds: 5,
        }
    }
}

impl DetectionConfig {
    /// Validate threshold ranges and duration ordering
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.eye_closed_threshold > 0.0 && self.eye_closed_threshold < 1.0) {
            return Err(ConfigError::EyeThresholdOutOfRange(self.eye_closed_threshold));
        }
        if self.yawn_threshold <= 0.0 {
            return Err(ConfigError::YawnThresholdOutOfRange(self.yawn_threshold));
        }
        if self.warning_duration_ms >= self.emergency_duration_ms {
            return Err(ConfigError::DurationOrdering(
                self.warning_duration_ms,
                self.emergency_duration_ms,
            ));
        }
        Ok(())
    }

    /// Warning escalation duration
    pub fn warning_duration(&self) -> Duration {
        Duration::from_millis(self.warning_duration_ms)
    }

    /// Emergency escalation duration
    pub fn emergency_duration(&self) -> Duration {
        Duration::from_millis(self.emergency_duration_ms)
    }

    /// Sustained-yawn hold duration
    pub fn yawn_hold(&self) -> Duration {
        Duration::from_millis(self.yawn_hold_ms)
    }
}
