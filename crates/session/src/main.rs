//! Drowsiness Monitor - Demo Entry Point
//!
//! Runs a monitoring session against a scripted synthetic producer with
//! log-backed audio and UI sinks.

use std::time::Duration;

use alerting::{AlertDispatcher, LogAudio, LogUi};
use session::{init_logging, MonitorSession, ScriptedFrame, ScriptedProducer, SessionConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== SafeDrive Drowsiness Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = SessionConfig::load(None)?;
    let dispatcher = AlertDispatcher::new(
        Box::new(LogAudio::new("caution")),
        Box::new(LogAudio::new("urgent")),
        Box::new(LogUi::default()),
        config.detection.countdown_danger_seconds,
    );
    let (session, _handle) = MonitorSession::new(config, dispatcher)?;

    // Scripted drive: alert driving, a long closure escalating into an
    // emergency, a yawn, then recovery.
    let mut script = vec![ScriptedFrame::ear(0.30); 4];
    script.extend(vec![ScriptedFrame::ear(0.12); 12]);
    script.push(ScriptedFrame::ear(0.30));
    script.extend(vec![ScriptedFrame::Face { ear: 0.30, mar: 0.65 }; 5]);
    script.extend(vec![ScriptedFrame::ear(0.30); 3]);

    session
        .run(ScriptedProducer::new(script, Duration::from_millis(500)))
        .await?;

    Ok(())
}
