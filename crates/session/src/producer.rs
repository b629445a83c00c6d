//! Landmark producer boundary
//!
//! The producer is an opaque source of per-frame landmark sets (camera +
//! face-mesh model in production). The session keeps a single acquisition
//! in flight at a time, which is the natural backpressure against a slow
//! detector.

use std::collections::VecDeque;
use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;

use face_geometry::{synthetic, LandmarkSet};
use incident_capture::FrameImage;

/// Producer error types
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("producer initialization failed: {0}")]
    Init(String),

    #[error("frame source closed")]
    Closed,

    #[error("frame acquisition failed: {0}")]
    Acquisition(String),
}

/// One acquired frame: detected faces, the still image it came from, and
/// the acquisition timestamp.
#[derive(Debug, Clone)]
pub struct FrameCapture {
    /// Zero or more detected faces; only the first is tracked
    pub faces: Vec<LandmarkSet>,
    /// Raw RGB still of the frame, when the source provides one
    pub image: Option<FrameImage>,
    /// Acquisition timestamp
    pub observed_at: Instant,
}

/// Asynchronous source of landmark frames.
///
/// `start` runs once before any frame is processed; a failure there is fatal
/// to the session. `next_frame` is awaited one call at a time.
pub trait LandmarkProducer: Send + 'static {
    fn start(&mut self) -> impl Future<Output = Result<(), ProducerError>> + Send;

    fn next_frame(&mut self) -> impl Future<Output = Result<FrameCapture, ProducerError>> + Send;
}

/// One step of a scripted drive
#[derive(Debug, Clone, Copy)]
pub enum ScriptedFrame {
    /// A face with the given eye and mouth aspect ratios
    Face { ear: f64, mar: f64 },
    /// No face detected this frame
    NoFace,
}

impl ScriptedFrame {
    /// Face frame with a neutral mouth
    pub fn ear(ear: f64) -> Self {
        Self::Face { ear, mar: 0.2 }
    }
}

/// Replays a fixed script of synthetic frames at a fixed interval.
///
/// Timestamps advance by the script interval independent of wall time, so
/// scripted runs behave identically under test-paused clocks.
pub struct ScriptedProducer {
    frames: VecDeque<ScriptedFrame>,
    interval: Duration,
    base: Instant,
    elapsed: Duration,
}

impl ScriptedProducer {
    pub fn new(frames: Vec<ScriptedFrame>, interval: Duration) -> Self {
        Self {
            frames: frames.into(),
            interval,
            base: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    fn still_frame() -> FrameImage {
        FrameImage::new(vec![32; 8 * 8 * 3], 8, 8)
    }
}

impl LandmarkProducer for ScriptedProducer {
    async fn start(&mut self) -> Result<(), ProducerError> {
        if self.frames.is_empty() {
            return Err(ProducerError::Init("empty frame script".to_string()));
        }
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<FrameCapture, ProducerError> {
        let Some(step) = self.frames.pop_front() else {
            return Err(ProducerError::Closed);
        };

        tokio::time::sleep(self.interval).await;
        let observed_at = self.base + self.elapsed;
        self.elapsed += self.interval;

        let (faces, image) = match step {
            ScriptedFrame::Face { ear, mar } => (
                vec![synthetic::face_with_ratios(ear, mar)],
                Some(Self::still_frame()),
            ),
            ScriptedFrame::NoFace => (Vec::new(), None),
        };

        Ok(FrameCapture {
            faces,
            image,
            observed_at,
        })
    }
}
