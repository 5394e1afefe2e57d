//! Demonstrates pose extraction and smoothing on synthetic landmark frames.

use hand_pose::landmark::{index, Landmark, LANDMARK_COUNT};
use hand_pose::{extract, scale_target, LandmarkSet, PoseSignal, SmoothedPose};

fn hand(overrides: &[(usize, [f32; 3])]) -> LandmarkSet {
    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    for &(i, [x, y, z]) in overrides {
        pts[i] = Landmark::new(x, y, z);
    }
    LandmarkSet::new(pts)
}

fn show(label: &str, pose: &PoseSignal) {
    println!(
        "   {:<26} target=({:.3}, {:.3})  pinch={:.3}  pitch={:+.3} yaw={:+.3} roll={:+.3}",
        label,
        pose.target_x,
        pose.target_y,
        pose.pinch,
        pose.rotation.pitch,
        pose.rotation.yaw,
        pose.rotation.roll,
    );
}

fn main() {
    println!("\n=== Hand Pose Extraction Demo ===\n");

    // ── 1. A centered, open pinch ─────────────────────────────────────────
    println!("1. Extraction");
    let open = hand(&[
        (index::THUMB_TIP, [0.4, 0.5, 0.0]),
        (index::INDEX_FINGER_TIP, [0.6, 0.5, 0.0]),
        (index::WRIST, [0.5, 0.9, 0.0]),
        (index::MIDDLE_FINGER_MCP, [0.5, 0.5, 0.0]),
        (index::INDEX_FINGER_MCP, [0.45, 0.5, 0.0]),
        (index::PINKY_MCP, [0.55, 0.5, 0.0]),
    ]);
    show("centered open pinch:", &extract(&open));

    let closed = hand(&[
        (index::THUMB_TIP, [0.3, 0.4, 0.0]),
        (index::INDEX_FINGER_TIP, [0.3, 0.4, 0.2]),
        (index::WRIST, [0.3, 0.8, 0.0]),
        (index::MIDDLE_FINGER_MCP, [0.3, 0.4, -0.1]),
        (index::INDEX_FINGER_MCP, [0.25, 0.42, 0.0]),
        (index::PINKY_MCP, [0.35, 0.38, 0.0]),
    ]);
    show("off-center closed pinch:", &extract(&closed));
    println!();

    // ── 2. Scale clamping ─────────────────────────────────────────────────
    println!("2. Pinch → scale (floor 0.2, gain 8)");
    for pinch in [0.0, 0.02, 0.1, 0.2, 0.4] {
        println!("   pinch {:.2} → scale target {:.2}", pinch, scale_target(pinch));
    }
    println!();

    // ── 3. Smoothing convergence ──────────────────────────────────────────
    println!("3. Smoothing toward a constant target (α = 0.1)");
    let signal = extract(&closed);
    let mut smoothed = SmoothedPose::default();
    for frame in 0..40 {
        smoothed.step(&signal);
        if frame % 8 == 0 {
            let (sx, sy) = smoothed.scene_position();
            println!(
                "   frame {:>2}: pos=({:.3}, {:.3})  scene=({:+.2}, {:+.2})  scale={:.3}",
                frame, smoothed.x, smoothed.y, sx, sy, smoothed.scale
            );
        }
    }
    println!("\n   (position and scale settle within a few dozen frames)\n");
}
