//! Per-frame exponential smoothing and the signal-to-scene mappings.
//!
//! The smoother is a fixed-rate low-pass filter: `smoothed += (target -
//! smoothed) * α` once per rendered frame, *not* time-delta-normalized.
//! Frame-rate variance therefore changes the perceived smoothing speed; that
//! is the tuned behavior and is kept as-is.

use crate::pose::{PoseSignal, Rotation};

/// Smoothing coefficient per frame for position, scale and rotation.
pub const SMOOTH_ALPHA: f32 = 0.1;
/// Slower coefficient for the color low-pass.
pub const COLOR_ALPHA: f32 = 0.05;
/// Minimum scale — keeps a closed pinch from collapsing the hologram.
pub const SCALE_FLOOR: f32 = 0.2;
/// Pinch-distance to scale multiplier.
pub const SCALE_GAIN: f32 = 8.0;
/// Normalized-to-scene span on the x axis.
pub const SCENE_SPAN_X: f32 = 10.0;
/// Normalized-to-scene span on the y axis (scene y points up).
pub const SCENE_SPAN_Y: f32 = 6.0;

/// One exponential-smoothing step toward `target`.
pub fn approach(current: &mut f32, target: f32, alpha: f32) {
    *current += (target - *current) * alpha;
}

/// Scale target for a given pinch distance: `max(0.2, pinch * 8)`.
pub fn scale_target(pinch: f32) -> f32 {
    (pinch * SCALE_GAIN).max(SCALE_FLOOR)
}

/// Remap a smoothed `[0, 1]` position to scene-space offsets.
pub fn scene_offset(x: f32, y: f32) -> (f32, f32) {
    ((x - 0.5) * SCENE_SPAN_X, -(y - 0.5) * SCENE_SPAN_Y)
}

/// Map summed smoothed pitch+yaw into hue space, `[0, 1)`.
pub fn rotation_hue(pitch: f32, yaw: f32) -> f32 {
    use std::f32::consts::TAU;
    ((pitch + yaw).abs() % TAU) / TAU
}

// ════════════════════════════════════════════════════════════════════════════
// SmoothedPose
// ════════════════════════════════════════════════════════════════════════════

/// Exponentially-smoothed copies of position, scale and rotation.
///
/// Owned exclusively by the render loop and advanced once per frame via
/// [`SmoothedPose::step`].
#[derive(Clone, Copy, Debug)]
pub struct SmoothedPose {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotation: Rotation,
}

impl Default for SmoothedPose {
    fn default() -> Self {
        SmoothedPose {
            x: 0.5,
            y: 0.5,
            scale: 1.0,
            rotation: Rotation::default(),
        }
    }
}

impl SmoothedPose {
    /// Advance every smoothed channel one frame toward `signal`.
    pub fn step(&mut self, signal: &PoseSignal) {
        approach(&mut self.x, signal.target_x, SMOOTH_ALPHA);
        approach(&mut self.y, signal.target_y, SMOOTH_ALPHA);
        approach(&mut self.scale, scale_target(signal.pinch), SMOOTH_ALPHA);
        approach(&mut self.rotation.pitch, signal.rotation.pitch, SMOOTH_ALPHA);
        approach(&mut self.rotation.yaw, signal.rotation.yaw, SMOOTH_ALPHA);
        approach(&mut self.rotation.roll, signal.rotation.roll, SMOOTH_ALPHA);
    }

    /// Current scene-space offset of the smoothed position.
    pub fn scene_position(&self) -> (f32, f32) {
        scene_offset(self.x, self.y)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
