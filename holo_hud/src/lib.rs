//! # holo_hud
//!
//! Hand-tracked holographic HUD: an external hand-landmark detector drives a
//! software-rendered 3D hologram — a glowing wireframe core with ring accents
//! and an ambient particle field — plus a 2D status overlay.
//!
//! ## Pipeline
//!
//! | Stage | Module | What it does |
//! |---|---|---|
//! | Tracking source | [`tracker`] | Delivers landmark frames over a channel |
//! | Pose extraction | `hand_pose` | Landmarks → position / pinch / rotation |
//! | Scene state | [`scene`] | Per-frame smoothing, color, opacity pulse |
//! | Projection | [`render3d`] | Wireframe meshes, fixed perspective camera |
//! | Window | [`visualizer`] | minifb framebuffer, input, status bar |
//! | Chrome | [`overlay`] | Status lamps, reticle, scanline |
//!
//! Data flows one-way per frame; the tracker cadence and the ~60 fps render
//! loop are independent, joined only by a `mpsc` channel drained with
//! `try_recv`.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse and keyboard drive a
//!   synthetic hand.  No camera needed.
//! * `camera` — **Capture mode**: a MediaPipe sidecar process owns the
//!   camera and streams landmark frames as JSON lines
//!   (see `scripts/hand_landmarker.py`).
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse | Move the hologram |
//! | `W` / `S` | Widen / narrow the pinch (hologram scale) |
//! | `Up` / `Down` | Tilt the palm (pitch, with natural yaw coupling) |
//! | `Left` / `Right` | Roll the knuckle line |
//! | `H` | Toggle hand presence (simulates detection loss) |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod overlay;
pub mod render3d;
pub mod scene;
pub mod tracker;
pub mod visualizer;
