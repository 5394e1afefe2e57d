//! # hand_pose
//!
//! Pure pose math for the hand-tracked holographic HUD: convert one frame of
//! hand-landmark detections into position / pinch / rotation signals, and
//! low-pass those signals across frames.
//!
//! No I/O, no threads, no dependencies — everything here is a pure function
//! of its inputs, so the HUD's "hardest" logic stays independently testable.
//!
//! ## Signal derivation
//!
//! | Signal | Landmarks | Formula |
//! |---|---|---|
//! | target x | thumb tip (4), index tip (8) | `1 - (thumbX + indexX) / 2` (mirrored) |
//! | target y | thumb tip (4), index tip (8) | `(thumbY + indexY) / 2` |
//! | pinch    | thumb tip (4), index tip (8) | planar Euclidean distance |
//! | pitch    | wrist (0), middle base (9)   | `atan2(Δz, Δy)` |
//! | yaw      | wrist (0), middle base (9)   | `-atan2(Δz, Δx)` |
//! | roll     | index base (5), pinky base (17) | `atan2(Δy, Δx)` |
//!
//! ## Smoothing
//!
//! [`SmoothedPose::step`] applies `smoothed += (target - smoothed) * 0.1`
//! per frame to position, scale and rotation.  Scale targets
//! `max(0.2, pinch * 8)`; positions remap to scene space as
//! `((x - 0.5) * 10, -(y - 0.5) * 6)`.

pub mod landmark;
pub mod pose;
pub mod smooth;

pub use landmark::{Landmark, LandmarkSet, LANDMARK_COUNT};
pub use pose::{extract, PoseSignal, Rotation};
pub use smooth::{
    approach, rotation_hue, scale_target, scene_offset, SmoothedPose, COLOR_ALPHA, SCALE_FLOOR,
    SCALE_GAIN, SMOOTH_ALPHA,
};
