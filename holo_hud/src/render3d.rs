//! Minimal 3D plumbing for the hologram: vectors, Euler rotation, a fixed
//! perspective camera, and the wireframe meshes the scene is built from.
//!
//! The camera never moves — it sits on the +z axis looking at the origin,
//! matching the original presentation (fov 75°, camera z = 5).

use hand_pose::Rotation;

// ════════════════════════════════════════════════════════════════════════════
// Vec3
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    pub fn scaled(self, s: f32) -> Self {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn translated(self, dx: f32, dy: f32, dz: f32) -> Self {
        Vec3::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        self.translated(-other.x, -other.y, -other.z).length()
    }

    /// Apply an intrinsic x→y→z Euler rotation (pitch, yaw, roll).
    pub fn rotated(self, rot: &Rotation) -> Self {
        // about x
        let (sx, cx) = rot.pitch.sin_cos();
        let (y1, z1) = (self.y * cx - self.z * sx, self.y * sx + self.z * cx);
        // about y
        let (sy, cy) = rot.yaw.sin_cos();
        let (x2, z2) = (self.x * cy + z1 * sy, -self.x * sy + z1 * cy);
        // about z
        let (sz, cz) = rot.roll.sin_cos();
        Vec3::new(x2 * cz - y1 * sz, x2 * sz + y1 * cz, z2)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Camera — fixed perspective projection
// ════════════════════════════════════════════════════════════════════════════

/// Fixed vertical field of view, radians (75°).
pub const FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;
/// Camera position on the +z axis.
pub const CAMERA_Z: f32 = 5.0;
/// Near clip; points closer than this to the camera are culled.
pub const NEAR: f32 = 0.1;

/// Project a scene-space point into pixel coordinates for a `w`×`h`
/// framebuffer.  Returns `None` for points behind the near plane.
pub fn project(p: Vec3, w: usize, h: usize) -> Option<(f32, f32)> {
    let view_z = CAMERA_Z - p.z;
    if view_z < NEAR {
        return None;
    }
    let focal = (h as f32 / 2.0) / (FOV_Y / 2.0).tan();
    let sx = w as f32 / 2.0 + p.x * focal / view_z;
    let sy = h as f32 / 2.0 - p.y * focal / view_z;
    Some((sx, sy))
}

// ════════════════════════════════════════════════════════════════════════════
// Wireframe meshes
// ════════════════════════════════════════════════════════════════════════════

/// The 12 edges of an axis-aligned cube with the given edge length.
pub fn cube_edges(size: f32) -> Vec<(Vec3, Vec3)> {
    let h = size / 2.0;
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { -h } else { h },
            if i & 2 == 0 { -h } else { h },
            if i & 4 == 0 { -h } else { h },
        )
    };
    let mut edges = Vec::with_capacity(12);
    for i in 0..8 {
        for bit in [1usize, 2, 4] {
            if i & bit == 0 {
                edges.push((corner(i), corner(i | bit)));
            }
        }
    }
    edges
}

/// The 30 edges of a regular icosahedron with the given circumradius.
pub fn icosahedron_edges(radius: f32) -> Vec<(Vec3, Vec3)> {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let s = radius / (1.0 + phi * phi).sqrt();

    let mut verts = Vec::with_capacity(12);
    for &a in &[-1.0f32, 1.0] {
        for &b in &[-phi, phi] {
            verts.push(Vec3::new(0.0, a * s, b * s));
            verts.push(Vec3::new(a * s, b * s, 0.0));
            verts.push(Vec3::new(b * s, 0.0, a * s));
        }
    }

    // Edges connect vertex pairs at the minimal inter-vertex distance (2s).
    let edge_len = 2.0 * s;
    let mut edges = Vec::with_capacity(30);
    for i in 0..verts.len() {
        for j in (i + 1)..verts.len() {
            if verts[i].distance(verts[j]) < edge_len * 1.05 {
                edges.push((verts[i], verts[j]));
            }
        }
    }
    edges
}

/// `segments` points of a circle in the x/y plane, counter-clockwise.
/// Consumers close the loop by joining the last point back to the first.
pub fn ring_points(radius: f32, segments: usize) -> Vec<Vec3> {
    (0..segments)
        .map(|i| {
            let a = i as f32 / segments as f32 * std::f32::consts::TAU;
            Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    #[test]
    fn origin_projects_to_center() {
        let (x, y) = project(Vec3::default(), 800, 600).unwrap();
        assert_eq!((x, y), (400.0, 300.0));
    }

    #[test]
    fn projection_axes_match_screen_convention() {
        let (rx, ry) = project(Vec3::new(1.0, 0.0, 0.0), 800, 600).unwrap();
        assert!(rx > 400.0 && ry == 300.0, "+x goes right");
        let (ux, uy) = project(Vec3::new(0.0, 1.0, 0.0), 800, 600).unwrap();
        assert!(uy < 300.0 && ux == 400.0, "+y goes up");
    }

    #[test]
    fn closer_points_project_larger() {
        let far = project(Vec3::new(1.0, 0.0, -2.0), 800, 600).unwrap();
        let near = project(Vec3::new(1.0, 0.0, 2.0), 800, 600).unwrap();
        assert!(near.0 > far.0);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        assert!(project(Vec3::new(0.0, 0.0, CAMERA_Z + 1.0), 800, 600).is_none());
    }

    #[test]
    fn cube_has_twelve_unit_edges() {
        let edges = cube_edges(1.0);
        assert_eq!(edges.len(), 12);
        for (a, b) in &edges {
            assert!((a.distance(*b) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn icosahedron_has_thirty_edges_on_sphere() {
        let edges = icosahedron_edges(0.5);
        assert_eq!(edges.len(), 30);
        let len = edges[0].0.distance(edges[0].1);
        for (a, b) in &edges {
            assert!((a.length() - 0.5).abs() < 1e-5);
            assert!((b.length() - 0.5).abs() < 1e-5);
            assert!((a.distance(*b) - len).abs() < 1e-5, "edges are congruent");
        }
    }

    #[test]
    fn ring_points_lie_on_radius() {
        let pts = ring_points(1.4, 64);
        assert_eq!(pts.len(), 64);
        for p in &pts {
            assert!((p.length() - 1.4).abs() < 1e-5);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn quarter_yaw_moves_x_into_depth() {
        let rot = Rotation::new(0.0, FRAC_PI_2, 0.0);
        let v = Vec3::new(1.0, 0.0, 0.0).rotated(&rot);
        assert!(v.x.abs() < 1e-6);
        assert!((v.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn full_turn_is_identity() {
        let rot = Rotation::new(TAU, TAU, TAU);
        let v = Vec3::new(0.3, -0.7, 0.2).rotated(&rot);
        assert!(v.distance(Vec3::new(0.3, -0.7, 0.2)) < 1e-5);
    }
}
