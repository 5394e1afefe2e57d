//! Hologram scene state.
//!
//! [`HoloScene`] owns the smoothed pose, the derived color/opacity, and the
//! static particle field.  It is advanced once per rendered frame by
//! [`HoloScene::tick`] and read by the visualizer; nothing else touches it.

use std::time::Instant;

use hand_pose::{rotation_hue, PoseSignal, Rotation, SmoothedPose, COLOR_ALPHA};

use crate::render3d::Vec3;

/// Continuous auto-rotation layered onto the yaw axis, rad/s of wall clock.
/// Keeps the hologram visually alive even when the hand is stationary.
pub const AUTO_ROTATE_RATE: f32 = 0.5;
/// Ring group z-spin per frame.
pub const RING_SPIN_RATE: f32 = -0.01;
/// Ring group scale relative to the core.
pub const RING_SCALE: f32 = 1.2;
/// Ambient particle count and field extents.
pub const PARTICLE_COUNT: usize = 1500;
pub const PARTICLE_SPAN: (f32, f32, f32) = (15.0, 10.0, 5.0);

/// Core opacity levels: the detected state flickers between the two, the
/// undetected state pins low.
pub const OPACITY_HI: f32 = 0.8;
pub const OPACITY_LO: f32 = 0.4;
pub const OPACITY_LOST: f32 = 0.1;

// ════════════════════════════════════════════════════════════════════════════
// Color helpers
// ════════════════════════════════════════════════════════════════════════════

/// Convert HSL to linear `[r, g, b]` channels in `[0, 1]`.  `h` in degrees.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}

/// Pack `[0, 1]` channels into 0xAARRGGBB with A = 0xFF.
pub fn pack_rgb(rgb: [f32; 3]) -> u32 {
    let ch = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    0xFF00_0000 | (ch(rgb[0]) << 16) | (ch(rgb[1]) << 8) | ch(rgb[2])
}

// ════════════════════════════════════════════════════════════════════════════
// HoloScene
// ════════════════════════════════════════════════════════════════════════════

pub struct HoloScene {
    smoothed: SmoothedPose,
    /// Current hologram color; lerps toward the rotation-derived hue at a
    /// slower rate than the pose channels.  Kept in float so the slow lerp
    /// actually reaches its target instead of sticking on integer steps.
    color: [f32; 3],
    opacity: f32,
    ring_spin: f32,
    particles: Vec<Vec3>,
    started: Instant,
}

impl HoloScene {
    pub fn new() -> Self {
        let (sx, sy, sz) = PARTICLE_SPAN;
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                Vec3::new(
                    (fastrand::f32() - 0.5) * sx,
                    (fastrand::f32() - 0.5) * sy,
                    (fastrand::f32() - 0.5) * sz,
                )
            })
            .collect();

        HoloScene {
            smoothed: SmoothedPose::default(),
            color: [0.0, 1.0, 1.0], // boot color: cyan
            opacity: OPACITY_HI,
            ring_spin: 0.0,
            particles,
            started: Instant::now(),
        }
    }

    /// Advance the scene one frame toward `signal`.
    ///
    /// `detected` gates opacity only: the pose channels keep smoothing toward
    /// the last known signal while the hand is lost.
    pub fn tick(&mut self, signal: &PoseSignal, detected: bool) {
        self.smoothed.step(signal);

        let hue = rotation_hue(self.smoothed.rotation.pitch, self.smoothed.rotation.yaw);
        let target = hsl_to_rgb(hue * 360.0, 0.8, 0.5);
        for (c, t) in self.color.iter_mut().zip(target) {
            *c += (t - *c) * COLOR_ALPHA;
        }

        // Flicker between the two levels while detected; comparison against
        // the prior value, not a timer.
        self.opacity = if detected {
            if self.opacity > 0.5 {
                OPACITY_LO
            } else {
                OPACITY_HI
            }
        } else {
            OPACITY_LOST
        };

        self.ring_spin += RING_SPIN_RATE;
    }

    // ── accessors for the render pass ────────────────────────────────────

    pub fn scene_position(&self) -> (f32, f32) {
        self.smoothed.scene_position()
    }

    pub fn scale(&self) -> f32 {
        self.smoothed.scale
    }

    /// Core rotation: smoothed hand rotation plus the wall-clock yaw spin.
    pub fn core_rotation(&self) -> Rotation {
        let r = self.smoothed.rotation;
        Rotation::new(r.pitch, r.yaw + self.auto_yaw(), r.roll)
    }

    pub fn ring_scale(&self) -> f32 {
        self.smoothed.scale * RING_SCALE
    }

    pub fn ring_rotation(&self) -> Rotation {
        Rotation::new(0.0, 0.0, self.ring_spin)
    }

    pub fn color(&self) -> u32 {
        pack_rgb(self.color)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn particles(&self) -> &[Vec3] {
        &self.particles
    }

    pub fn smoothed(&self) -> &SmoothedPose {
        &self.smoothed
    }

    fn auto_yaw(&self) -> f32 {
        self.started.elapsed().as_secs_f32() * AUTO_ROTATE_RATE
    }
}

impl Default for HoloScene {
    fn default() -> Self {
        Self::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
