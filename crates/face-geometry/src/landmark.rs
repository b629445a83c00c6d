//! Landmark data model

use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Number of landmarks produced by the reference face-mesh model.
pub const FACE_MESH_LANDMARKS: usize = 468;

/// A 2-D landmark in normalized [0,1] frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    /// Create a new landmark
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another landmark
    pub fn distance(&self, other: &Landmark) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// An ordered set of landmarks, indexed by stable semantic position.
///
/// The upstream model fixes the length; all points share the same frame's
/// normalized coordinate space, which makes derived ratios scale-invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    /// Create a set from an ordered sequence of landmarks
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Create a set from (x, y) pairs
    pub fn from_xy(pairs: &[(f64, f64)]) -> Self {
        Self {
            points: pairs.iter().map(|&(x, y)| Landmark::new(x, y)).collect(),
        }
    }

    /// Number of landmarks in the set
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set holds no landmarks
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Landmark at a semantic position
    pub fn get(&self, index: usize) -> Result<Landmark, GeometryError> {
        self.points
            .get(index)
            .copied()
            .ok_or(GeometryError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_get_in_range() {
        let set = LandmarkSet::from_xy(&[(0.1, 0.2), (0.3, 0.4)]);
        let p = set.get(1).unwrap();
        assert_eq!(p, Landmark::new(0.3, 0.4));
    }

    #[test]
    fn test_get_out_of_range() {
        let set = LandmarkSet::from_xy(&[(0.1, 0.2)]);
        assert!(matches!(
            set.get(5),
            Err(GeometryError::IndexOutOfRange { index: 5, len: 1 })
        ));
    }
}
