//! Incident Capture
//!
//! Outbound logging of alert incidents:
//! - Still-frame JPEG encoding and base64 data-URL payloads
//! - JSON POST to a remote logging endpoint
//! - Fire-and-forget dispatch; transport failures never reach the frame loop

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Capture error types
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint rejected incident: status {0}")]
    Rejected(reqwest::StatusCode),
}

/// Incident type label carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncidentKind {
    Drowsy,
    Yawning,
}

impl IncidentKind {
    /// Wire label for the logging endpoint
    pub fn label(&self) -> &'static str {
        match self {
            IncidentKind::Drowsy => "Drowsy",
            IncidentKind::Yawning => "Yawning",
        }
    }
}

/// Raw RGB still frame (width * height * 3 bytes)
#[derive(Debug, Clone)]
pub struct FrameImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameImage {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// One incident, created once per closure episode at emergency entry
#[derive(Debug, Clone)]
pub struct IncidentRecord {
    pub incident_id: Uuid,
    pub kind: IncidentKind,
    pub image: FrameImage,
    pub captured_at: DateTime<Utc>,
}

impl IncidentRecord {
    pub fn new(kind: IncidentKind, image: FrameImage) -> Self {
        Self {
            incident_id: Uuid::new_v4(),
            kind,
            image,
            captured_at: Utc::now(),
        }
    }
}

/// JSON body accepted by the logging endpoint
#[derive(Debug, Serialize, Deserialize)]
struct IncidentPayload {
    image: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Capture client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Logging endpoint URL
    pub endpoint: String,
    /// Request timeout (milliseconds)
    pub timeout_ms: u64,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/log_drowsiness".to_string(),
            timeout_ms: 5000,
            jpeg_quality: 80,
        }
    }
}

/// Client posting incident records to the logging endpoint.
///
/// Cheap to clone; the underlying HTTP connection pool is shared.
#[derive(Debug, Clone)]
pub struct CaptureClient {
    config: CaptureConfig,
    http: reqwest::Client,
}

impl CaptureClient {
    /// Create a new capture client
    pub fn new(config: CaptureConfig) -> Result<Self, CaptureError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { config, http })
    }

    /// Encode an RGB frame as a `data:image/jpeg;base64,...` URL
    pub fn encode_data_url(&self, image: &FrameImage) -> Result<String, CaptureError> {
        let buffer =
            image::RgbImage::from_raw(image.width, image.height, image.data.clone()).ok_or_else(
                || {
                    CaptureError::Encode(format!(
                        "buffer length {} does not match {}x{} RGB frame",
                        image.data.len(),
                        image.width,
                        image.height
                    ))
                },
            )?;

        let mut jpeg = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, self.config.jpeg_quality)
            .encode_image(&buffer)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;

        Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&jpeg)))
    }

    /// Post one incident to the logging endpoint
    pub async fn send(&self, record: &IncidentRecord) -> Result<(), CaptureError> {
        let payload = IncidentPayload {
            image: self.encode_data_url(&record.image)?,
            kind: record.kind.label().to_string(),
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CaptureError::Rejected(response.status()));
        }

        debug!(
            incident_id = %record.incident_id,
            kind = record.kind.label(),
            "incident logged"
        );
        Ok(())
    }

    /// Fire-and-forget dispatch: the core never awaits, retries, or blocks
    /// on the outcome. Failures are logged and dropped.
    pub fn spawn_send(&self, record: IncidentRecord) {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(e) = client.send(&record).await {
                warn!(
                    incident_id = %record.incident_id,
                    kind = record.kind.label(),
                    "incident capture failed: {e}"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32) -> FrameImage {
        FrameImage::new(vec![128; (width * height * 3) as usize], width, height)
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(IncidentKind::Drowsy.label(), "Drowsy");
        assert_eq!(IncidentKind::Yawning.label(), "Yawning");
    }

    #[test]
    fn test_encode_produces_jpeg_data_url() {
        let client = CaptureClient::new(CaptureConfig::default()).unwrap();
        let url = client.encode_data_url(&solid_frame(16, 16)).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn test_encode_rejects_mismatched_buffer() {
        let client = CaptureClient::new(CaptureConfig::default()).unwrap();
        let bad = FrameImage::new(vec![0; 10], 16, 16);
        assert!(matches!(
            client.encode_data_url(&bad),
            Err(CaptureError::Encode(_))
        ));
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = IncidentPayload {
            image: "data:image/jpeg;base64,xyz".to_string(),
            kind: IncidentKind::Drowsy.label().to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "Drowsy");
        assert!(json["image"].as_str().unwrap().starts_with("data:image/jpeg"));
    }

    #[tokio::test]
    async fn test_send_failure_is_an_error_not_a_panic() {
        // Unroutable endpoint: the plain send surfaces the transport error
        let client = CaptureClient::new(CaptureConfig {
            endpoint: "http://127.0.0.1:1/log_drowsiness".to_string(),
            timeout_ms: 200,
            ..Default::default()
        })
        .unwrap();
        let record = IncidentRecord::new(IncidentKind::Drowsy, solid_frame(8, 8));
        assert!(client.send(&record).await.is_err());
    }
}
