//! Monitoring Session
//!
//! Wires the landmark producer, metric extraction, drowsiness state machine,
//! and side-effect dispatcher into a single frame-driven loop. All alert
//! state mutation happens on the session task, so transitions apply strictly
//! in frame-arrival order.

pub mod config;
pub mod producer;
pub mod session;

pub use config::SessionConfig;
pub use producer::{
    FrameCapture, LandmarkProducer, ProducerError, ScriptedFrame, ScriptedProducer,
};
pub use session::{MonitorSession, SessionHandle};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Session error types
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("configuration loading failed: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid detection settings: {0}")]
    Detection(#[from] drowsiness::ConfigError),

    #[error("capture client initialization failed: {0}")]
    Capture(#[from] incident_capture::CaptureError),

    #[error("landmark producer failed: {0}")]
    Producer(#[from] ProducerError),
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
