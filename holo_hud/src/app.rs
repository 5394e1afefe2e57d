//! Top-level application state machine.
//!
//! `AppState` owns the latest pose signal, the detection/camera flags, the
//! [`HoloScene`] and the [`OverlayState`].  It consumes [`TrackerEvent`]s and
//! drives the visualizer each frame.

use std::sync::mpsc::{self, TryRecvError};

use hand_pose::{extract, PoseSignal};

use crate::overlay::OverlayState;
use crate::scene::HoloScene;
use crate::tracker::{spawn_tracker_source, SimInput, TrackerEvent};
use crate::visualizer::{Visualizer, DEFAULT_WIN_H, DEFAULT_WIN_W};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,

    // Capture settings, forwarded to the detector sidecar in camera mode.
    pub capture_width: u32,
    pub capture_height: u32,
    pub max_hands: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    /// Sidecar program; arguments are derived from the capture settings.
    pub sidecar_program: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            title: "Holo Hand — Kinetic Interface".to_string(),
            width: DEFAULT_WIN_W,
            height: DEFAULT_WIN_H,
            capture_width: 1280,
            capture_height: 720,
            max_hands: 1,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            sidecar_program: "scripts/hand_landmarker.py".to_string(),
        }
    }
}

impl AppConfig {
    /// Full sidecar command line for camera mode.
    #[cfg(feature = "camera")]
    pub fn sidecar_command(&self) -> Vec<String> {
        vec![
            "python3".to_string(),
            self.sidecar_program.clone(),
            "--width".to_string(),
            self.capture_width.to_string(),
            "--height".to_string(),
            self.capture_height.to_string(),
            "--max-hands".to_string(),
            self.max_hands.to_string(),
            "--min-detection-confidence".to_string(),
            self.min_detection_confidence.to_string(),
            "--min-tracking-confidence".to_string(),
            self.min_tracking_confidence.to_string(),
        ]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    // ── tracking state ───────────────────────────────────────────────────
    /// Last known pose.  Retained across detection loss — only the flag
    /// below is cleared when the hand disappears.
    pose: PoseSignal,
    hand_detected: bool,
    camera_ready: bool,

    // ── presentation state ───────────────────────────────────────────────
    scene: HoloScene,
    overlay: OverlayState,

    // ── status message ───────────────────────────────────────────────────
    pub status: String,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            pose: PoseSignal::default(),
            hand_detected: false,
            camera_ready: false,
            scene: HoloScene::new(),
            overlay: OverlayState::default(),
            status: "Waiting for capture device…".to_string(),
        }
    }

    // ── process one TrackerEvent ─────────────────────────────────────────

    pub fn handle_event(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::CameraReady => {
                self.camera_ready = true;
                log::info!("capture device online");
                self.status = "Capture online — scanning for a hand".to_string();
            }

            TrackerEvent::Hand(set) => {
                self.pose = extract(&set);
                self.hand_detected = true;
            }

            TrackerEvent::NoHand => {
                // Detection flag clears on the same tick; the pose stays.
                self.hand_detected = false;
            }

            TrackerEvent::CameraError(e) => {
                self.camera_ready = false;
                self.hand_detected = false;
                log::error!("capture failed: {}", e);
                self.status = format!("CAPTURE FAILED: {}", e);
            }

            TrackerEvent::Quit => { /* handled in run loop */ }
        }
    }

    // ── per-frame tick ───────────────────────────────────────────────────

    pub fn tick(&mut self) {
        self.scene.tick(&self.pose, self.hand_detected);

        self.overlay.camera_ready = self.camera_ready;
        self.overlay.hand_detected = self.hand_detected;
        self.overlay.tick();

        if self.hand_detected {
            let s = self.scene.smoothed();
            self.status = format!(
                "TRACK  pos=({:.2}, {:.2})  pinch={:.3}  scale={:.2}",
                s.x, s.y, self.pose.pinch, s.scale
            );
        }
    }

    // ── accessors for the render loop ────────────────────────────────────

    pub fn scene(&self) -> &HoloScene {
        &self.scene
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn hand_detected(&self) -> bool {
        self.hand_detected
    }

    pub fn camera_ready(&self) -> bool {
        self.camera_ready
    }

    pub fn pose(&self) -> &PoseSignal {
        &self.pose
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer and the tracking source (simulation by default,
/// camera sidecar with `--features camera`) and drives the event/render loop
/// at ~60 fps.  Returns when the window closes or quit is requested.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    // ── Sim input channel (the visualizer always produces these) ─────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    #[cfg(not(feature = "camera"))]
    let tracker_rx = spawn_tracker_source(crate::tracker::SimTrackerSource { rx: sim_rx });

    #[cfg(feature = "camera")]
    let tracker_rx = {
        // Camera mode: pointer/pinch inputs have no simulated hand to steer.
        drop(sim_rx);
        spawn_tracker_source(crate::tracker::SidecarTrackerSource {
            command: cfg.sidecar_command(),
        })
    };

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(&cfg.title, cfg.width, cfg.height, sim_tx)?;

    // ── App state ────────────────────────────────────────────────────────
    let mut app = AppState::new();
    let mut tracker_alive = true;

    // ── Main loop ────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → SimInput
        if !vis.poll_input() {
            break;
        }

        // 2. Drain tracker events (the tracker cadence is independent of the
        //    display refresh; the newest event wins before we tick)
        while tracker_alive {
            match tracker_rx.try_recv() {
                Ok(TrackerEvent::Quit) => return Ok(()),
                Ok(evt) => app.handle_event(evt),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Degraded, not fatal: keep rendering the last state.
                    log::warn!("tracking source disconnected");
                    app.handle_event(TrackerEvent::CameraError(
                        "tracking source disconnected".to_string(),
                    ));
                    tracker_alive = false;
                }
            }
        }

        // 3. Per-frame logic
        app.tick();

        // 4. Render
        vis.render(app.scene(), app.overlay(), &app.status);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::landmark::{index, Landmark, LANDMARK_COUNT};
    use hand_pose::{LandmarkSet, SCALE_FLOOR};
    use std::f32::consts::PI;

    fn fixture_hand() -> LandmarkSet {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[index::THUMB_TIP] = Landmark::new(0.4, 0.5, 0.0);
        pts[index::INDEX_FINGER_TIP] = Landmark::new(0.6, 0.5, 0.0);
        pts[index::WRIST] = Landmark::new(0.5, 0.9, 0.0);
        pts[index::MIDDLE_FINGER_MCP] = Landmark::new(0.5, 0.5, 0.0);
        pts[index::INDEX_FINGER_MCP] = Landmark::new(0.45, 0.5, 0.0);
        pts[index::PINKY_MCP] = Landmark::new(0.55, 0.5, 0.0);
        LandmarkSet::new(pts)
    }

    #[test]
    fn camera_ready_sets_flag() {
        let mut app = AppState::new();
        assert!(!app.camera_ready());
        app.handle_event(TrackerEvent::CameraReady);
        assert!(app.camera_ready());
    }

    #[test]
    fn hand_event_extracts_pose() {
        let mut app = AppState::new();
        app.handle_event(TrackerEvent::Hand(fixture_hand()));
        assert!(app.hand_detected());
        let pose = app.pose();
        assert!((pose.target_x - 0.5).abs() < 1e-6);
        assert!((pose.target_y - 0.5).abs() < 1e-6);
        assert!((pose.pinch - 0.2).abs() < 1e-6);
        assert!((pose.rotation.pitch - PI).abs() < 1e-6);
        assert_eq!(pose.rotation.yaw, 0.0);
        assert_eq!(pose.rotation.roll, 0.0);
    }

    #[test]
    fn detection_loss_retains_last_pose() {
        let mut app = AppState::new();
        app.handle_event(TrackerEvent::Hand(fixture_hand()));
        let before = *app.pose();

        app.handle_event(TrackerEvent::NoHand);
        assert!(!app.hand_detected(), "flag clears on the same tick");
        assert_eq!(*app.pose(), before, "pose is retained, not zeroed");
    }

    #[test]
    fn camera_error_clears_ready() {
        let mut app = AppState::new();
        app.handle_event(TrackerEvent::CameraReady);
        app.handle_event(TrackerEvent::CameraError("no device".to_string()));
        assert!(!app.camera_ready());
        assert!(app.status.contains("no device"));
    }

    #[test]
    fn tick_converges_scale_to_floor_for_closed_pinch() {
        let mut app = AppState::new();
        let mut pts = *fixture_hand().points();
        pts[index::INDEX_FINGER_TIP] = pts[index::THUMB_TIP]; // pinch = 0
        app.handle_event(TrackerEvent::Hand(LandmarkSet::new(pts)));
        for _ in 0..400 {
            app.tick();
        }
        assert!((app.scene().scale() - SCALE_FLOOR).abs() < 1e-3);
    }

    #[test]
    fn tick_keeps_smoothing_while_hand_lost() {
        let mut app = AppState::new();
        app.handle_event(TrackerEvent::Hand(fixture_hand()));
        app.handle_event(TrackerEvent::NoHand);
        for _ in 0..200 {
            app.tick();
        }
        // smoothed rotation keeps converging toward the retained pose
        assert!((app.scene().smoothed().rotation.pitch - PI).abs() < 1e-3);
    }

    #[test]
    fn overlay_mirrors_flags_after_tick() {
        let mut app = AppState::new();
        app.handle_event(TrackerEvent::CameraReady);
        app.handle_event(TrackerEvent::Hand(fixture_hand()));
        app.tick();
        assert!(app.overlay().camera_ready);
        assert!(app.overlay().hand_detected);

        app.handle_event(TrackerEvent::NoHand);
        app.tick();
        assert!(!app.overlay().hand_detected);
    }

    #[test]
    fn status_reports_tracking_numbers() {
        let mut app = AppState::new();
        app.handle_event(TrackerEvent::Hand(fixture_hand()));
        app.tick();
        assert!(app.status.starts_with("TRACK"));
        assert!(app.status.contains("pinch=0.200"));
    }
}
