//! Landmark-to-pose derivation.
//!
//! [`extract`] maps one [`LandmarkSet`] to a [`PoseSignal`]: a 2D target
//! position, a pinch distance, and a three-axis rotation estimate.
//!
//! The rotation is a heuristic, not a rotation-matrix decomposition — it can
//! jump near axis-aligned poses where `atan2` changes branch.  Downstream
//! smoothing papers over small jumps; the formulas themselves are kept exactly
//! as tuned and must not be "corrected".

use crate::landmark::LandmarkSet;

// ════════════════════════════════════════════════════════════════════════════
// PoseSignal
// ════════════════════════════════════════════════════════════════════════════

/// Approximate hand orientation in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotation {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Rotation { pitch, yaw, roll }
    }
}

/// The derived per-frame hand pose.
///
/// Only meaningful while a hand is detected in the current or a recent frame —
/// "hand detected" is a gating flag carried separately by the tracker, and on
/// detection loss consumers keep the last signal rather than resetting it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseSignal {
    /// Target position in `[0, 1]` normalized space, x mirrored to match a
    /// mirrored camera preview.
    pub target_x: f32,
    pub target_y: f32,
    /// Thumb-tip to index-tip distance in the x/y plane.  Approaches 0 for a
    /// closed pinch; consumers must clamp (see `smooth::scale_target`).
    pub pinch: f32,
    pub rotation: Rotation,
}

impl Default for PoseSignal {
    /// Centered, slightly-open pinch, no rotation — the state assumed before
    /// the first detection arrives.
    fn default() -> Self {
        PoseSignal {
            target_x: 0.5,
            target_y: 0.5,
            pinch: 0.1,
            rotation: Rotation::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Extraction
// ════════════════════════════════════════════════════════════════════════════

/// Derive a [`PoseSignal`] from one landmark set.
///
/// * Target: midpoint of thumb tip and index tip, x mirrored (`1 - cx`).
/// * Pinch: planar thumb-tip↔index-tip distance.
/// * Pitch/yaw: wrist → middle-finger-base vector; yaw sign-inverted for
///   visual convention.
/// * Roll: index-base → pinky-base vector.
pub fn extract(hand: &LandmarkSet) -> PoseSignal {
    let thumb = hand.thumb_tip();
    let index = hand.index_tip();

    let center_x = (thumb.x + index.x) / 2.0;
    let center_y = (thumb.y + index.y) / 2.0;

    let pinch = thumb.planar_distance(&index);

    let wrist = hand.wrist();
    let middle_base = hand.middle_base();
    let pitch = (middle_base.z - wrist.z).atan2(middle_base.y - wrist.y);
    let yaw = (middle_base.z - wrist.z).atan2(middle_base.x - wrist.x);

    let index_base = hand.index_base();
    let pinky_base = hand.pinky_base();
    let roll = (pinky_base.y - index_base.y).atan2(pinky_base.x - index_base.x);

    PoseSignal {
        target_x: 1.0 - center_x,
        target_y: center_y,
        pinch,
        rotation: Rotation::new(pitch, -yaw, roll),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{index, Landmark, LANDMARK_COUNT};
    use std::f32::consts::PI;

    const EPS: f32 = 1e-6;

    /// Build a set where every landmark sits at the origin except the given
    /// `(index, point)` overrides.
    fn hand_with(overrides: &[(usize, [f32; 3])]) -> LandmarkSet {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        for &(i, [x, y, z]) in overrides {
            pts[i] = Landmark::new(x, y, z);
        }
        LandmarkSet::new(pts)
    }

    #[test]
    fn target_is_mirrored_midpoint() {
        let hand = hand_with(&[
            (index::THUMB_TIP, [0.2, 0.3, 0.9]),
            (index::INDEX_FINGER_TIP, [0.4, 0.5, -0.3]),
        ]);
        let pose = extract(&hand);
        assert!((pose.target_x - (1.0 - 0.3)).abs() < EPS);
        assert!((pose.target_y - 0.4).abs() < EPS);
    }

    #[test]
    fn target_independent_of_z() {
        let flat = hand_with(&[
            (index::THUMB_TIP, [0.2, 0.3, 0.0]),
            (index::INDEX_FINGER_TIP, [0.4, 0.5, 0.0]),
        ]);
        let deep = hand_with(&[
            (index::THUMB_TIP, [0.2, 0.3, 5.0]),
            (index::INDEX_FINGER_TIP, [0.4, 0.5, -5.0]),
        ]);
        let a = extract(&flat);
        let b = extract(&deep);
        assert_eq!(a.target_x, b.target_x);
        assert_eq!(a.target_y, b.target_y);
        assert_eq!(a.pinch, b.pinch);
    }

    #[test]
    fn pinch_is_planar_euclidean() {
        let hand = hand_with(&[
            (index::THUMB_TIP, [0.1, 0.2, 0.7]),
            (index::INDEX_FINGER_TIP, [0.4, 0.6, -0.7]),
        ]);
        assert!((extract(&hand).pinch - 0.5).abs() < EPS);
    }

    #[test]
    fn pinch_zero_iff_tips_coincide_in_xy() {
        let hand = hand_with(&[
            (index::THUMB_TIP, [0.3, 0.3, 0.0]),
            (index::INDEX_FINGER_TIP, [0.3, 0.3, 0.4]),
        ]);
        assert_eq!(extract(&hand).pinch, 0.0);
    }

    #[test]
    fn upright_palm_has_zero_pitch_and_yaw() {
        // wrist at origin, middle base straight "down" the y axis
        let hand = hand_with(&[(index::MIDDLE_FINGER_MCP, [0.0, 1.0, 0.0])]);
        let rot = extract(&hand).rotation;
        assert_eq!(rot.pitch, 0.0); // atan2(0, 1)
        assert_eq!(rot.yaw, 0.0); // -atan2(0, 0)
    }

    #[test]
    fn level_knuckles_have_zero_roll() {
        let hand = hand_with(&[(index::PINKY_MCP, [1.0, 0.0, 0.0])]);
        assert_eq!(extract(&hand).rotation.roll, 0.0); // atan2(0, 1)
    }

    #[test]
    fn yaw_sign_is_inverted() {
        // middle base toward +z and +x: raw atan2 is positive, signal negative
        let hand = hand_with(&[(index::MIDDLE_FINGER_MCP, [1.0, 0.0, 1.0])]);
        let rot = extract(&hand).rotation;
        assert!((rot.yaw + PI / 4.0).abs() < EPS);
    }

    #[test]
    fn end_to_end_fixture() {
        let hand = hand_with(&[
            (index::THUMB_TIP, [0.4, 0.5, 0.0]),
            (index::INDEX_FINGER_TIP, [0.6, 0.5, 0.0]),
            (index::WRIST, [0.5, 0.9, 0.0]),
            (index::MIDDLE_FINGER_MCP, [0.5, 0.5, 0.0]),
            (index::INDEX_FINGER_MCP, [0.45, 0.5, 0.0]),
            (index::PINKY_MCP, [0.55, 0.5, 0.0]),
        ]);
        let pose = extract(&hand);
        assert!((pose.target_x - 0.5).abs() < EPS);
        assert!((pose.target_y - 0.5).abs() < EPS);
        assert!((pose.pinch - 0.2).abs() < EPS);
        // middle base is *above* the wrist: atan2(0, -0.4) = π
        assert!((pose.rotation.pitch - PI).abs() < EPS);
        assert_eq!(pose.rotation.yaw, 0.0);
        assert_eq!(pose.rotation.roll, 0.0);
    }

    #[test]
    fn default_signal_is_centered() {
        let d = PoseSignal::default();
        assert_eq!(d.target_x, 0.5);
        assert_eq!(d.target_y, 0.5);
        assert!(d.pinch > 0.0);
    }
}
