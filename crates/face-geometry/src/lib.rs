//! Facial Landmark Geometry
//!
//! Data model and metrics for normalized 2-D facial landmarks:
//! - Landmark sets as produced by a face-mesh model (468 points)
//! - Six-point contour index schemes for eyes and mouth
//! - Eye/mouth aspect-ratio computation (EAR/MAR)

pub mod contour;
pub mod landmark;
pub mod synthetic;

pub use contour::{
    aspect_ratio, eye_aspect_ratio, mouth_aspect_ratio, ContourIndices, LEFT_EYE, MOUTH, RIGHT_EYE,
};
pub use landmark::{Landmark, LandmarkSet, FACE_MESH_LANDMARKS};

use thiserror::Error;

/// Geometry error types
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("landmark index {index} out of range for set of {len} points")]
    IndexOutOfRange { index: usize, len: usize },
}
