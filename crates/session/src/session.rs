//! Monitoring session
//!
//! One task owns the state machine; frames, countdown ticks, and the stop
//! signal are multiplexed onto it. The producer runs on its own task feeding
//! a capacity-1 channel, keeping one acquisition in flight at a time.

use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use alerting::AlertDispatcher;
use drowsiness::{
    classify_eyes, classify_mouth, DrowsinessMonitor, Observation, StateEvent, YawnDetector,
    MAX_TRACKED_FACES,
};
use face_geometry::{eye_aspect_ratio, mouth_aspect_ratio};
use incident_capture::{CaptureClient, FrameImage, IncidentKind, IncidentRecord};

use crate::config::SessionConfig;
use crate::producer::{FrameCapture, LandmarkProducer, ProducerError};
use crate::SessionError;

/// Handle for stopping a running session
pub struct SessionHandle {
    stop_tx: watch::Sender<bool>,
}

impl SessionHandle {
    /// Request the session to stop after the current frame
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }
}

/// A monitoring session: frame loop, countdown ticker, and stop semantics
pub struct MonitorSession {
    config: SessionConfig,
    monitor: DrowsinessMonitor,
    yawn: YawnDetector,
    dispatcher: AlertDispatcher,
    capture: CaptureClient,
    stop_rx: watch::Receiver<bool>,
}

impl MonitorSession {
    /// Create a session and its stop handle
    pub fn new(
        config: SessionConfig,
        dispatcher: AlertDispatcher,
    ) -> Result<(Self, SessionHandle), SessionError> {
        config.detection.validate()?;
        let capture = CaptureClient::new(config.capture.clone())?;
        let monitor = DrowsinessMonitor::new(config.detection.clone());
        let yawn = YawnDetector::new(config.detection.yawn_hold());
        let (stop_tx, stop_rx) = watch::channel(false);

        Ok((
            Self {
                config,
                monitor,
                yawn,
                dispatcher,
                capture,
                stop_rx,
            },
            SessionHandle { stop_tx },
        ))
    }

    /// Run the session until the producer closes or a stop is requested.
    ///
    /// Producer initialization failure is fatal and surfaced before any
    /// frame is processed. On exit the alert audio is stopped and rewound,
    /// the overlay hidden, and the state machine reset, so a subsequent
    /// start begins clean.
    pub async fn run<P: LandmarkProducer>(mut self, mut producer: P) -> Result<(), SessionError> {
        producer.start().await?;

        let (tx, mut rx) = mpsc::channel(1);
        let feeder = spawn_feeder(producer, tx);
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        let mut stop_rx = self.stop_rx.clone();
        info!("monitoring session started");

        loop {
            tokio::select! {
                maybe_frame = rx.recv() => {
                    match maybe_frame {
                        Some(frame) => self.process_frame(&frame),
                        None => {
                            info!("frame source closed");
                            break;
                        }
                    }
                }
                _ = ticker.tick() => {
                    let elapsed = self.monitor.episode_elapsed(Instant::now());
                    self.dispatcher.tick(elapsed);
                }
                _ = stop_rx.changed() => {
                    info!("stop requested");
                    break;
                }
            }
        }

        drop(rx);
        feeder.abort();
        self.dispatcher.reset();
        self.monitor.reset();
        self.yawn.reset();
        info!("monitoring session stopped");
        Ok(())
    }

    fn process_frame(&mut self, frame: &FrameCapture) {
        if frame.faces.len() > MAX_TRACKED_FACES {
            debug!(
                detected = frame.faces.len(),
                "multiple faces detected, tracking the first"
            );
        }
        let face = frame.faces.first();

        let observation = match face {
            None => Observation::NoFace,
            Some(set) => match eye_aspect_ratio(set) {
                Ok(Some(ear)) => {
                    self.dispatcher.metric(ear);
                    Observation::Eyes(classify_eyes(
                        ear,
                        self.config.detection.eye_closed_threshold,
                    ))
                }
                Ok(None) => {
                    debug!("degenerate eye geometry, holding state");
                    Observation::NoFace
                }
                Err(e) => {
                    warn!("eye metric failed: {e}");
                    Observation::NoFace
                }
            },
        };

        for event in self.monitor.update(observation, frame.observed_at) {
            self.dispatcher.handle(event);
            if event == StateEvent::EmergencyEntered {
                self.capture_incident(IncidentKind::Drowsy, frame.image.as_ref());
            }
        }

        if let Some(set) = face {
            match mouth_aspect_ratio(set) {
                Ok(Some(mar)) => {
                    let mouth = classify_mouth(mar, self.config.detection.yawn_threshold);
                    if self.yawn.update(mouth, frame.observed_at) {
                        self.capture_incident(IncidentKind::Yawning, frame.image.as_ref());
                    }
                }
                Ok(None) => debug!("degenerate mouth geometry, skipping yawn metric"),
                Err(e) => warn!("mouth metric failed: {e}"),
            }
        }
    }

    fn capture_incident(&self, kind: IncidentKind, image: Option<&FrameImage>) {
        match image {
            Some(img) => {
                let record = IncidentRecord::new(kind, img.clone());
                info!(
                    incident_id = %record.incident_id,
                    kind = kind.label(),
                    "dispatching incident capture"
                );
                self.capture.spawn_send(record);
            }
            None => warn!(kind = kind.label(), "no still frame available for incident"),
        }
    }
}

fn spawn_feeder<P: LandmarkProducer>(
    mut producer: P,
    tx: mpsc::Sender<FrameCapture>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match producer.next_frame().await {
                Ok(frame) => {
                    if tx.send(frame).await.is_err() {
                        break;
                    }
                }
                Err(ProducerError::Closed) => break,
                Err(e) => warn!("frame acquisition failed: {e}"),
            }
        }
    })
}
