//! 2D HUD chrome drawn over the hologram.
//!
//! Pure presentation from two boolean inputs — camera ready and hand
//! detected — plus two free-running decorative animations (the scanline
//! sweep and the kinetics bars).

use crate::visualizer::{label_width, Visualizer, STATUS_BAR_H};

const CYAN: u32 = 0xFF22D3EE;
const CYAN_DIM: u32 = 0xFF155E75;
const PANEL_BG: u32 = 0xFF0B2030;
const GREEN: u32 = 0xFF22C55E;
const RED: u32 = 0xFFEF4444;
const YELLOW: u32 = 0xFFEAB308;

/// Frames for one full scanline sweep (~4 s at 60 fps).
const SCAN_PERIOD: f32 = 240.0;
const BAR_COUNT: usize = 8;

// ════════════════════════════════════════════════════════════════════════════
// OverlayState
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug)]
pub struct OverlayState {
    pub camera_ready: bool,
    pub hand_detected: bool,
    /// Scanline position, normalized `[0, 1)` of window height.
    scan_pos: f32,
    /// Phase driving the kinetics bars.
    bar_phase: f32,
}

impl Default for OverlayState {
    fn default() -> Self {
        OverlayState {
            camera_ready: false,
            hand_detected: false,
            scan_pos: 0.0,
            bar_phase: 0.0,
        }
    }
}

impl OverlayState {
    /// Advance the decorative animations one frame.
    pub fn tick(&mut self) {
        self.scan_pos = (self.scan_pos + 1.0 / SCAN_PERIOD) % 1.0;
        self.bar_phase += 0.12;
    }

    pub fn scan_pos(&self) -> f32 {
        self.scan_pos
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Drawing
// ════════════════════════════════════════════════════════════════════════════

pub fn draw(vis: &mut Visualizer, state: &OverlayState) {
    let w = vis.width();
    let h = vis.height();
    let bottom = h.saturating_sub(STATUS_BAR_H);

    // ── Title block, top-left ─────────────────────────────────────────────
    vis.fill_rect(24, 24, 232, 52, PANEL_BG);
    vis.fill_rect(24, 24, 2, 52, CYAN); // left accent
    vis.fill_rect(24, 24, 232, 2, CYAN); // top accent
    vis.draw_label_scaled("HOLO HAND INTERFACE", 36, 34, CYAN, 2);
    vis.draw_label("KINETIC PROJECTION V4.2", 36, 58, CYAN_DIM);

    // ── Status lamps, top-right ───────────────────────────────────────────
    vis.draw_label("SYSTEM STATUS", w.saturating_sub(label_width("SYSTEM STATUS", 1) + 24), 24, CYAN);
    lamp_row(
        vis,
        34,
        if state.camera_ready { GREEN } else { RED },
        if state.camera_ready { "CAM ONLINE" } else { "INITIALIZING" },
    );
    lamp_row(
        vis,
        44,
        if state.hand_detected { GREEN } else { YELLOW },
        if state.hand_detected { "HAND DETECTED" } else { "SCANNING HANDS" },
    );

    // ── Center target reticle while no hand is present ────────────────────
    if !state.hand_detected {
        let cx = (w / 2) as i32;
        let cy = (h / 2) as i32;
        vis.draw_circle(cx, cy, 48, CYAN_DIM);
        vis.draw_circle(cx, cy, 49, CYAN_DIM);
        vis.fill_rect(w / 2 - 1, h / 2 - 1, 2, 2, CYAN);
        let msg = "SHOW YOUR HAND TO INITIALIZE";
        vis.draw_label(msg, w / 2 - label_width(msg, 1) / 2, h / 2 + 60, CYAN);
    }

    // ── Kinetics bars, bottom-left ────────────────────────────────────────
    let base_y = bottom.saturating_sub(28);
    for i in 0..BAR_COUNT {
        let height = if state.hand_detected {
            let s = (state.bar_phase + i as f32 * 0.35).sin() * 0.5 + 0.5;
            4 + (s * 12.0) as usize
        } else {
            4
        };
        let color = if state.hand_detected { CYAN } else { CYAN_DIM };
        vis.fill_rect(24 + i * 8, base_y.saturating_sub(height), 4, height, color);
    }
    vis.draw_label("ANALYZING KINETICS", 24 + BAR_COUNT * 8 + 12, base_y.saturating_sub(8), CYAN_DIM);

    // ── Caption, bottom-right ─────────────────────────────────────────────
    let caption = "SECURE PROTOCOL ENABLED // COORDINATE MAPPING ACTIVE";
    vis.draw_label(
        caption,
        w.saturating_sub(label_width(caption, 1) + 24),
        bottom.saturating_sub(16),
        CYAN_DIM,
    );

    // ── Scanline sweep ────────────────────────────────────────────────────
    let scan_y = (state.scan_pos * h as f32) as i32;
    for x in 0..w as i32 {
        vis.blend_add(x, scan_y, CYAN, 0.35);
        vis.blend_add(x, scan_y - 1, CYAN, 0.12);
        vis.blend_add(x, scan_y + 1, CYAN, 0.12);
    }
}

fn lamp_row(vis: &mut Visualizer, y: usize, lamp: u32, text: &str) {
    let w = vis.width();
    let text_x = w.saturating_sub(label_width(text, 1) + 24);
    vis.fill_rect(text_x.saturating_sub(8), y, 4, 4, lamp);
    vis.draw_label(text, text_x, y, CYAN_DIM);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
