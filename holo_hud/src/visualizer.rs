//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ [title block]                          [status lamps]       │
//! │                                                             │
//! │              · · particles · ·                              │
//! │          ╭─ ring group ─╮                                   │
//! │          │  wireframe   │   ← follows the smoothed hand,    │
//! │          │  core        │     scales with the pinch         │
//! │          ╰──────────────╯                                   │
//! │ [kinetics bars]                        [caption]            │
//! │ status bar                                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The hologram is drawn with additive blending onto a near-black field;
//! overlay chrome is drawn opaque on top (see [`crate::overlay`]).

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::overlay::{self, OverlayState};
use crate::render3d::{self, cube_edges, icosahedron_edges, ring_points, Vec3};
use crate::scene::HoloScene;
use crate::tracker::SimInput;

use std::sync::mpsc::Sender;

pub const DEFAULT_WIN_W: usize = 1280;
pub const DEFAULT_WIN_H: usize = 720;

const BG_COLOR: u32 = 0xFF05050F;
const PARTICLE_COLOR: u32 = 0xFF00FFFF;
const PARTICLE_ALPHA: f32 = 0.3;
const RING_ALPHA: f32 = 0.2;
const DIAMOND_RING_ALPHA: f32 = 0.4;
pub(crate) const STATUS_BAR_H: usize = 22;
const STATUS_BG: u32 = 0xFF0F3460;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    width: usize,
    height: usize,
    sim_tx: Sender<SimInput>,
    last_pointer: (f32, f32),
}

impl Visualizer {
    pub fn new(
        title: &str,
        width: usize,
        height: usize,
        sim_tx: Sender<SimInput>,
    ) -> Result<Self, String> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; width * height],
            width,
            height,
            sim_tx,
            last_pointer: (0.5, 0.5),
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Poll window input and translate to [`SimInput`] events.
    /// Sends are fire-and-forget: in camera mode nobody listens and that's fine.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }

        // Keys that trigger on first press only
        let one_shot = |w: &Window, k: Key| w.is_key_pressed(k, KeyRepeat::No);
        // Keys that repeat while held
        let held = |w: &Window, k: Key| w.is_key_down(k);

        if one_shot(&self.window, Key::Q) || one_shot(&self.window, Key::Escape) {
            let _ = self.sim_tx.send(SimInput::Quit);
            return false;
        }
        if one_shot(&self.window, Key::H) {
            let _ = self.sim_tx.send(SimInput::ToggleHand);
        }

        // Pinch (W widens, S narrows)
        if held(&self.window, Key::W) {
            let _ = self.sim_tx.send(SimInput::PinchDelta(0.01));
        }
        if held(&self.window, Key::S) {
            let _ = self.sim_tx.send(SimInput::PinchDelta(-0.01));
        }
        // Rotation
        if held(&self.window, Key::Up) {
            let _ = self.sim_tx.send(SimInput::PitchDelta(0.05));
        }
        if held(&self.window, Key::Down) {
            let _ = self.sim_tx.send(SimInput::PitchDelta(-0.05));
        }
        if held(&self.window, Key::Left) {
            let _ = self.sim_tx.send(SimInput::RollDelta(-0.05));
        }
        if held(&self.window, Key::Right) {
            let _ = self.sim_tx.send(SimInput::RollDelta(0.05));
        }

        // Pointer steers the simulated hand
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let nx = mx / self.width.max(1) as f32;
            let ny = my / self.height.max(1) as f32;
            let (lx, ly) = self.last_pointer;
            if (nx - lx).abs() > 1e-3 || (ny - ly).abs() > 1e-3 {
                self.last_pointer = (nx, ny);
                let _ = self.sim_tx.send(SimInput::Pointer { x: nx, y: ny });
            }
        }

        true
    }

    /// Render one frame.
    pub fn render(&mut self, scene: &HoloScene, overlay: &OverlayState, status: &str) {
        self.sync_size();
        self.buf.fill(BG_COLOR);

        // ── Ambient particles ─────────────────────────────────────────────
        for p in scene.particles() {
            if let Some((x, y)) = self.project(*p) {
                self.blend_add(x as i32, y as i32, PARTICLE_COLOR, PARTICLE_ALPHA);
            }
        }

        // ── Ring group ────────────────────────────────────────────────────
        let (tx, ty) = scene.scene_position();
        let ring_rot = scene.ring_rotation();
        let place_ring = |v: Vec3| {
            v.rotated(&ring_rot)
                .scaled(scene.ring_scale())
                .translated(tx, ty, 0.0)
        };
        self.draw_loop(&ring_points(1.4, 64), &place_ring, scene.color(), RING_ALPHA);
        self.draw_loop(
            &ring_points(1.51, 4),
            &place_ring,
            PARTICLE_COLOR,
            DIAMOND_RING_ALPHA,
        );

        // ── Core group ────────────────────────────────────────────────────
        let core_rot = scene.core_rotation();
        let place_core = |v: Vec3| {
            v.rotated(&core_rot)
                .scaled(scene.scale())
                .translated(tx, ty, 0.0)
        };
        let opacity = scene.opacity();
        for (a, b) in cube_edges(1.0) {
            self.draw_line3(place_core(a), place_core(b), scene.color(), opacity);
        }
        for (a, b) in icosahedron_edges(0.5) {
            self.draw_line3(place_core(a), place_core(b), scene.color(), opacity);
        }
        // Central glow point
        if let Some((cx, cy)) = self.project(Vec3::new(tx, ty, 0.0)) {
            if let Some((ex, _)) = self.project(Vec3::new(tx + 0.1 * scene.scale(), ty, 0.0)) {
                let r = (ex - cx).max(1.0) as i32;
                self.fill_circle(cx as i32, cy as i32, r, 0xFFFFFFFF, opacity);
            }
        }

        // ── HUD overlay chrome ────────────────────────────────────────────
        overlay::draw(self, overlay);

        // ── Status bar ────────────────────────────────────────────────────
        let status_y = self.height.saturating_sub(STATUS_BAR_H);
        self.fill_rect(0, status_y, self.width, STATUS_BAR_H, STATUS_BG);
        self.draw_label(status, 10, status_y + 4, 0xFFEEEEEE);
        self.draw_label(
            "mouse=move  w/s=pinch  arrows=tilt/roll  h=toggle hand  q=quit",
            10,
            status_y + 12,
            0xFF888888,
        );

        self.window
            .update_with_buffer(&self.buf, self.width, self.height)
            .ok();
    }

    /// Keep the framebuffer in lockstep with the window size.
    fn sync_size(&mut self) {
        let (w, h) = self.window.get_size();
        if w > 0 && h > 0 && (w != self.width || h != self.height) {
            self.width = w;
            self.height = h;
            self.buf = vec![BG_COLOR; w * h];
        }
    }

    fn project(&self, p: Vec3) -> Option<(f32, f32)> {
        render3d::project(p, self.width, self.height)
    }

    fn draw_loop<F: Fn(Vec3) -> Vec3>(&mut self, pts: &[Vec3], place: &F, color: u32, alpha: f32) {
        for i in 0..pts.len() {
            let a = place(pts[i]);
            let b = place(pts[(i + 1) % pts.len()]);
            self.draw_line3(a, b, color, alpha);
        }
    }

    fn draw_line3(&mut self, a: Vec3, b: Vec3, color: u32, alpha: f32) {
        if let (Some((ax, ay)), Some((bx, by))) = (self.project(a), self.project(b)) {
            self.draw_line(ax as i32, ay as i32, bx as i32, by as i32, color, alpha);
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    pub(crate) fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    /// Additive blend: dst + color·alpha, saturating per channel.
    pub(crate) fn blend_add(&mut self, x: i32, y: i32, color: u32, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        let dst = self.buf[idx];
        let add = |shift: u32| {
            let d = (dst >> shift) & 0xFF;
            let c = ((color >> shift) & 0xFF) as f32 * alpha;
            (d + c as u32).min(0xFF)
        };
        self.buf[idx] = 0xFF00_0000 | (add(16) << 16) | (add(8) << 8) | add(0);
    }

    /// Bresenham line with additive blending.
    pub(crate) fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32, alpha: f32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.blend_add(x, y, color, alpha);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub(crate) fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    /// Midpoint circle outline.
    pub(crate) fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        let (mut x, mut y) = (r, 0);
        let mut err = 1 - r;
        while x >= y {
            for &(px, py) in &[
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx + x, cy - y),
                (cx - x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx + y, cy - x),
                (cx - y, cy - x),
            ] {
                self.set_pixel(px, py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    pub(crate) fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32, alpha: f32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.blend_add(cx + dx, cy + dy, color, alpha);
                }
            }
        }
    }

    /// Minimal bitmap font — 3×5 characters for label rendering.
    pub(crate) fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        self.draw_label_scaled(text, x, y, color, 1);
    }

    pub(crate) fn draw_label_scaled(
        &mut self,
        text: &str,
        x: usize,
        y: usize,
        color: u32,
        scale: usize,
    ) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.set_pixel(
                                    (cx + col * scale + sx) as i32,
                                    (y + row * scale + sy) as i32,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > self.width {
                break;
            }
        }
    }
}

/// Pixel width of a label at the given scale (for right-aligned layout).
pub(crate) fn label_width(text: &str, scale: usize) -> usize {
    text.chars().count() * 4 * scale
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_width_counts_cells() {
        assert_eq!(label_width("", 1), 0);
        assert_eq!(label_width("abc", 1), 12);
        assert_eq!(label_width("ab", 2), 16);
    }

    #[test]
    fn ring_alphas_match_presentation() {
        // tuned levels: main ring faint, diamond accent stronger
        assert_eq!(RING_ALPHA, 0.2);
        assert_eq!(DIAMOND_RING_ALPHA, 0.4);
        assert!(RING_ALPHA < DIAMOND_RING_ALPHA);
    }

    #[test]
    fn glyphs_fit_three_columns() {
        for c in "abcdefghijklmnoprstuvwxyz0123456789/-.,:=+ ".chars() {
            for row in char_glyph(c) {
                assert!(row <= 0b111, "glyph {:?} overflows 3 columns", c);
            }
        }
    }
}
