//! Per-frame threshold classification
//!
//! Single-frame comparisons with no hysteresis band: one frame crossing
//! the boundary flips the classification.

use serde::{Deserialize, Serialize};

/// Eye classification for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EyeClass {
    Open,
    Closed,
}

/// Mouth classification for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouthClass {
    Normal,
    Yawning,
}

/// Classify eyes: closed iff EAR falls below the threshold
pub fn classify_eyes(ear: f64, threshold: f64) -> EyeClass {
    if ear < threshold {
        EyeClass::Closed
    } else {
        EyeClass::Open
    }
}

/// Classify mouth: yawning iff MAR rises above the threshold
pub fn classify_mouth(mar: f64, threshold: f64) -> MouthClass {
    if mar > threshold {
        MouthClass::Yawning
    } else {
        MouthClass::Normal
    }
}
