//! Contour index schemes and aspect-ratio computation
//!
//! The six-point contour convention: p1 and p4 are the horizontal corners,
//! (p2, p6) and (p3, p5) are the vertical lid/lip pairs.
//! EAR = (|p2-p6| + |p3-p5|) / (2 * |p1-p4|)

use crate::landmark::LandmarkSet;
use crate::GeometryError;

/// Horizontal spans below this are treated as degenerate geometry.
pub const MIN_HORIZONTAL_SPAN: f64 = 1e-6;

/// Six semantic landmark positions defining a contour polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourIndices(pub [usize; 6]);

/// Left-eye contour of the reference face-mesh model
pub const LEFT_EYE: ContourIndices = ContourIndices([33, 160, 158, 133, 153, 144]);

/// Right-eye contour of the reference face-mesh model
pub const RIGHT_EYE: ContourIndices = ContourIndices([362, 385, 387, 263, 373, 380]);

/// Mouth contour in the same six-point shape (corners 61/291, lip pairs)
pub const MOUTH: ContourIndices = ContourIndices([61, 81, 311, 291, 402, 178]);

/// Compute the aspect ratio of a six-point contour.
///
/// Pure function over the selected landmarks. Returns `Ok(None)` when the
/// horizontal span is degenerate (the ratio would divide by ~0); the caller
/// skips that frame's metric. Errors only when an index violates the
/// producer's landmark-count contract.
pub fn aspect_ratio(
    set: &LandmarkSet,
    indices: ContourIndices,
) -> Result<Option<f64>, GeometryError> {
    let [i1, i2, i3, i4, i5, i6] = indices.0;
    let p1 = set.get(i1)?;
    let p2 = set.get(i2)?;
    let p3 = set.get(i3)?;
    let p4 = set.get(i4)?;
    let p5 = set.get(i5)?;
    let p6 = set.get(i6)?;

    let horizontal = p1.distance(&p4);
    if horizontal < MIN_HORIZONTAL_SPAN {
        return Ok(None);
    }

    let v1 = p2.distance(&p6);
    let v2 = p3.distance(&p5);

    Ok(Some((v1 + v2) / (2.0 * horizontal)))
}

/// Composite per-frame EAR: the mean of the left-eye and right-eye ratios.
///
/// Averaging smooths asymmetric blinks or occlusion of one eye. `None` if
/// either eye's geometry is degenerate.
pub fn eye_aspect_ratio(set: &LandmarkSet) -> Result<Option<f64>, GeometryError> {
    let left = aspect_ratio(set, LEFT_EYE)?;
    let right = aspect_ratio(set, RIGHT_EYE)?;
    Ok(match (left, right) {
        (Some(l), Some(r)) => Some((l + r) / 2.0),
        _ => None,
    })
}

/// Mouth aspect ratio (MAR) over the mouth contour
pub fn mouth_aspect_ratio(set: &LandmarkSet) -> Result<Option<f64>, GeometryError> {
    aspect_ratio(set, MOUTH)
}
