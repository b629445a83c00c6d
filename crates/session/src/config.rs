//! Session configuration
//!
//! Layered loading: built-in defaults, then an optional `monitor.toml`,
//! then `MONITOR_`-prefixed environment overrides.

use ::config::{Config, Environment, File};
use serde::Deserialize;

use drowsiness::DetectionConfig;
use incident_capture::CaptureConfig;

use crate::SessionError;

/// Complete session configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Detection thresholds and escalation durations
    pub detection: DetectionConfig,

    /// Incident capture endpoint settings
    pub capture: CaptureConfig,
}

impl SessionConfig {
    /// Load configuration; `path` overrides the default `monitor` file stem
    pub fn load(path: Option<&str>) -> Result<Self, SessionError> {
        let settings = Config::builder()
            .add_source(File::with_name(path.unwrap_or("monitor")).required(false))
            .add_source(Environment::with_prefix("MONITOR").separator("__"))
            .build()?;

        let config: SessionConfig = settings.try_deserialize()?;
        config.detection.validate()?;
        Ok(config)
    }
}
