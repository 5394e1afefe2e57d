//! Hand landmark types.
//!
//! A [`LandmarkSet`] is one detector frame: 21 points in normalized image
//! coordinates, indexed by anatomical position (MediaPipe hand landmark
//! convention).  Sets are produced fresh each frame; no identity persists
//! across frames.

use std::ops::Index;

/// Number of landmarks in one hand detection.
pub const LANDMARK_COUNT: usize = 21;

/// Anatomical landmark indices (MediaPipe hand landmark model convention).
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// A single 3D landmark point.
///
/// `x` and `y` are normalized image coordinates in `[0, 1]`; `z` is relative
/// depth (no absolute unit, smaller = closer to the camera).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    /// Euclidean distance to `other` in the x/y plane only (z ignored).
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSet
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand: an ordered set of 21 landmarks.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        LandmarkSet { points }
    }

    /// Build a set from raw `[x, y, z]` triples (the detector wire shape).
    /// Returns `None` unless exactly 21 points are supplied.
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            return None;
        }
        let mut set = [Landmark::default(); LANDMARK_COUNT];
        for (dst, p) in set.iter_mut().zip(points) {
            *dst = Landmark::new(p[0], p[1], p[2]);
        }
        Some(LandmarkSet::new(set))
    }

    // ── anatomical accessors used by the pose extractor ──────────────────

    pub fn wrist(&self) -> Landmark       { self.points[index::WRIST] }
    pub fn thumb_tip(&self) -> Landmark   { self.points[index::THUMB_TIP] }
    pub fn index_tip(&self) -> Landmark   { self.points[index::INDEX_FINGER_TIP] }
    pub fn index_base(&self) -> Landmark  { self.points[index::INDEX_FINGER_MCP] }
    pub fn middle_base(&self) -> Landmark { self.points[index::MIDDLE_FINGER_MCP] }
    pub fn pinky_base(&self) -> Landmark  { self.points[index::PINKY_MCP] }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

impl Index<usize> for LandmarkSet {
    type Output = Landmark;

    fn index(&self, i: usize) -> &Landmark {
        &self.points[i]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_requires_21() {
        assert!(LandmarkSet::from_points(&[[0.0; 3]; 20]).is_none());
        assert!(LandmarkSet::from_points(&[[0.0; 3]; 22]).is_none());
        assert!(LandmarkSet::from_points(&[[0.0; 3]; 21]).is_some());
    }

    #[test]
    fn from_points_preserves_order() {
        let mut raw = [[0.0f32; 3]; 21];
        raw[index::THUMB_TIP] = [0.25, 0.5, -0.1];
        let set = LandmarkSet::from_points(&raw).unwrap();
        assert_eq!(set.thumb_tip(), Landmark::new(0.25, 0.5, -0.1));
        assert_eq!(set[index::THUMB_TIP], set.thumb_tip());
    }

    #[test]
    fn planar_distance_ignores_z() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(0.3, 0.4, 9.0);
        assert!((a.planar_distance(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn planar_distance_zero_iff_same_xy() {
        let a = Landmark::new(0.2, 0.7, 0.0);
        let b = Landmark::new(0.2, 0.7, 0.5);
        assert_eq!(a.planar_distance(&b), 0.0);
    }
}
