//! Synthetic landmark sets with prescribed metrics
//!
//! Used by scripted producers and tests when no real face-mesh model is
//! wired in. Only the contour positions carry geometry; every other
//! landmark sits at the origin.

use crate::contour::{ContourIndices, LEFT_EYE, MOUTH, RIGHT_EYE};
use crate::landmark::{Landmark, LandmarkSet, FACE_MESH_LANDMARKS};

/// Build a full-size landmark set whose eyes read exactly `ear` and whose
/// mouth reads exactly `mar`.
pub fn face_with_ratios(ear: f64, mar: f64) -> LandmarkSet {
    let mut points = vec![Landmark::new(0.0, 0.0); FACE_MESH_LANDMARKS];
    place_contour(&mut points, LEFT_EYE, (0.3, 0.4), 0.1, ear);
    place_contour(&mut points, RIGHT_EYE, (0.6, 0.4), 0.1, ear);
    place_contour(&mut points, MOUTH, (0.4, 0.7), 0.2, mar);
    LandmarkSet::new(points)
}

/// Place a six-point contour with horizontal span `width` starting at
/// `origin`, shaped so its aspect ratio is exactly `ratio`.
fn place_contour(
    points: &mut [Landmark],
    indices: ContourIndices,
    origin: (f64, f64),
    width: f64,
    ratio: f64,
) {
    let (x, y) = origin;
    // Each vertical pair spans ratio * width, making
    // (v1 + v2) / (2 * width) == ratio.
    let half = ratio * width / 2.0;
    let [i1, i2, i3, i4, i5, i6] = indices.0;
    points[i1] = Landmark::new(x, y);
    points[i4] = Landmark::new(x + width, y);
    points[i2] = Landmark::new(x + width * 0.25, y + half);
    points[i6] = Landmark::new(x + width * 0.25, y - half);
    points[i3] = Landmark::new(x + width * 0.75, y + half);
    points[i5] = Landmark::new(x + width * 0.75, y - half);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::{eye_aspect_ratio, mouth_aspect_ratio};

    #[test]
    fn test_prescribed_ratios_round_trip() {
        let set = face_with_ratios(0.22, 0.5);
        let ear = eye_aspect_ratio(&set).unwrap().unwrap();
        let mar = mouth_aspect_ratio(&set).unwrap().unwrap();
        assert!((ear - 0.22).abs() < 1e-9);
        assert!((mar - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_full_model_length() {
        let set = face_with_ratios(0.3, 0.3);
        assert_eq!(set.len(), FACE_MESH_LANDMARKS);
    }
}
