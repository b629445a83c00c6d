//! Drowsiness Detection Core
//!
//! Real-time alertness analysis from per-frame eye/mouth metrics:
//! - Threshold classification of eye and mouth aspect ratios
//! - Duration-gated escalation (Ok -> Warning -> Emergency)
//! - One-shot emergency events per closure episode
//! - Yawn detection with per-episode capture events

pub mod classifier;
pub mod config;
pub mod monitor;
pub mod yawn;

pub use classifier::{classify_eyes, classify_mouth, EyeClass, MouthClass};
pub use config::{ConfigError, DetectionConfig, MAX_TRACKED_FACES};
pub use monitor::{AlertState, DrowsinessMonitor, Observation, StateEvent};
pub use yawn::YawnDetector;
