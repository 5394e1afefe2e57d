//! Tracking sources — both the real camera detector and mouse/keyboard
//! simulation.
//!
//! The public interface is [`TrackerEvent`] delivered over a `mpsc` channel.
//! Consumers don't need to know whether frames came from the MediaPipe
//! sidecar or from the simulator.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use hand_pose::landmark::{index, Landmark, LANDMARK_COUNT};
use hand_pose::LandmarkSet;

// ════════════════════════════════════════════════════════════════════════════
// TrackerEvent
// ════════════════════════════════════════════════════════════════════════════

/// One report from the tracking source.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackerEvent {
    /// The capture device is running and delivering frames.
    CameraReady,

    /// One hand was detected this frame.
    Hand(LandmarkSet),

    /// No hand in this frame.  Not an error — consumers clear their
    /// detection flag and hold the last known pose.
    NoHand,

    /// The capture device or detector failed.  Reported once; surfaces as a
    /// persistent "not ready" state — there is no retry.
    CameraError(String),

    /// Quit the application.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// TrackerSource trait — unified interface for camera and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`TrackerEvent`]s over a channel.
pub trait TrackerSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<TrackerEvent>);
}

/// Spawn a tracking source on its own thread and return the receiving end.
pub fn spawn_tracker_source<T: TrackerSource>(source: T) -> Receiver<TrackerEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SidecarTrackerSource — real camera (feature = "camera")
// ════════════════════════════════════════════════════════════════════════════

/// Tracking source backed by a MediaPipe sidecar process.
///
/// The sidecar owns the camera (1280×720 by default) and runs the hand
/// landmark model, emitting one JSON line per frame on stdout:
///
/// ```text
/// {"event":"camera_ready"}
/// {"hand":[[x,y,z], …21 points]}
/// {"hand":null}
/// ```
///
/// Spawn or stream failure is reported as [`TrackerEvent::CameraError`] and
/// the thread exits; the UI stays in its "not ready" state indefinitely.
#[cfg(feature = "camera")]
pub struct SidecarTrackerSource {
    /// Program + arguments, e.g. `["python3", "scripts/hand_landmarker.py", …]`.
    pub command: Vec<String>,
}

#[cfg(feature = "camera")]
impl TrackerSource for SidecarTrackerSource {
    fn run(self: Box<Self>, tx: Sender<TrackerEvent>) {
        use std::io::{BufRead, BufReader};
        use std::process::{Command, Stdio};

        let (program, args) = match self.command.split_first() {
            Some(split) => split,
            None => {
                let _ = tx.send(TrackerEvent::CameraError("empty sidecar command".into()));
                return;
            }
        };

        log::info!("starting tracker sidecar: {}", self.command.join(" "));
        let mut child = match Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .spawn()
        {
            Ok(c) => c,
            Err(e) => {
                let _ = tx.send(TrackerEvent::CameraError(format!(
                    "failed to start sidecar {}: {}",
                    program, e
                )));
                return;
            }
        };

        // Stdout is piped, so take() always succeeds here.
        let stdout = match child.stdout.take() {
            Some(s) => s,
            None => {
                let _ = tx.send(TrackerEvent::CameraError("sidecar stdout unavailable".into()));
                return;
            }
        };

        for line in BufReader::new(stdout).lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    let _ = tx.send(TrackerEvent::CameraError(format!("sidecar read: {}", e)));
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_sidecar_line(&line) {
                Some(event) => {
                    if tx.send(event).is_err() {
                        // Receiver gone — consumer shut down; stop the capture.
                        let _ = child.kill();
                        return;
                    }
                }
                None => log::warn!("unparseable sidecar line: {}", line),
            }
        }

        // Sidecar stream ended without the consumer going away.
        let _ = tx.send(TrackerEvent::CameraError("tracker sidecar exited".into()));
        let _ = child.wait();
    }
}

/// Parse one sidecar stdout line into a [`TrackerEvent`].
#[cfg(feature = "camera")]
pub fn parse_sidecar_line(line: &str) -> Option<TrackerEvent> {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct SidecarLine {
        #[serde(default)]
        event: Option<String>,
        #[serde(default)]
        hand: Option<Vec<[f32; 3]>>,
    }

    let msg: SidecarLine = serde_json::from_str(line).ok()?;
    if let Some(event) = msg.event {
        return match event.as_str() {
            "camera_ready" => Some(TrackerEvent::CameraReady),
            "camera_error" => Some(TrackerEvent::CameraError("reported by sidecar".into())),
            _ => None,
        };
    }
    match msg.hand {
        Some(points) => LandmarkSet::from_points(&points).map(TrackerEvent::Hand),
        None => Some(TrackerEvent::NoHand),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimTrackerSource — mouse/keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer moved; coordinates normalized to `[0, 1]` window space.
    Pointer { x: f32, y: f32 },
    /// Widen / narrow the simulated pinch.
    PinchDelta(f32),
    /// Tilt the simulated palm forward / back.
    PitchDelta(f32),
    /// Rotate the simulated knuckle line.
    RollDelta(f32),
    /// Toggle hand presence (simulates detection loss).
    ToggleHand,
    Quit,
}

/// Tracking source driven by [`SimInput`] events from the visualizer's window.
///
/// The pointer steers the hand center, W/S the pinch, arrow keys the
/// rotation, and `H` toggles detection loss.  Each input is answered with a
/// fresh synthetic landmark frame, so the rest of the pipeline is exercised
/// exactly as in camera mode.
pub struct SimTrackerSource {
    pub rx: Receiver<SimInput>,
}

impl TrackerSource for SimTrackerSource {
    fn run(self: Box<Self>, tx: Sender<TrackerEvent>) {
        let mut hand = SyntheticHand::default();

        // The simulated capture device is ready immediately.
        if tx.send(TrackerEvent::CameraReady).is_err() {
            return;
        }

        for input in self.rx {
            match input {
                SimInput::Pointer { x, y } => {
                    hand.center_x = x.clamp(0.0, 1.0);
                    hand.center_y = y.clamp(0.0, 1.0);
                }
                SimInput::PinchDelta(d) => {
                    hand.pinch = (hand.pinch + d).clamp(0.0, 0.5);
                }
                SimInput::PitchDelta(d) => hand.pitch += d,
                SimInput::RollDelta(d) => hand.roll += d,
                SimInput::ToggleHand => hand.present = !hand.present,
                SimInput::Quit => {
                    let _ = tx.send(TrackerEvent::Quit);
                    return;
                }
            }

            let event = if hand.present {
                TrackerEvent::Hand(hand.landmarks())
            } else {
                TrackerEvent::NoHand
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SyntheticHand
// ════════════════════════════════════════════════════════════════════════════

/// Parameters of the simulated hand, invertible through the pose extractor:
/// extraction of [`SyntheticHand::landmarks`] recovers `(center, pinch,
/// pitch, roll)` exactly (yaw picks up the natural pitch coupling, since both
/// share the palm's depth component).
#[derive(Clone, Copy, Debug)]
pub struct SyntheticHand {
    /// Desired *screen* target; the generator pre-mirrors x so the extractor's
    /// `1 - cx` lands back on this value.
    pub center_x: f32,
    pub center_y: f32,
    pub pinch: f32,
    pub pitch: f32,
    pub roll: f32,
    pub present: bool,
}

impl Default for SyntheticHand {
    fn default() -> Self {
        SyntheticHand {
            center_x: 0.5,
            center_y: 0.5,
            pinch: 0.15,
            pitch: 0.0,
            roll: 0.0,
            present: true,
        }
    }
}

impl SyntheticHand {
    /// Palm length from wrist to middle-finger base, normalized units.
    const PALM: f32 = 0.25;
    /// Half the knuckle span from index base to pinky base.
    const KNUCKLE: f32 = 0.12;

    /// Generate one landmark frame.  Only the landmarks the extractor reads
    /// are anatomically placed; the rest sit at the hand center.
    pub fn landmarks(&self) -> LandmarkSet {
        let cx = 1.0 - self.center_x; // undo the preview mirror
        let cy = self.center_y;

        let mut pts = [Landmark::new(cx, cy, 0.0); LANDMARK_COUNT];

        pts[index::THUMB_TIP] = Landmark::new(cx - self.pinch / 2.0, cy, 0.0);
        pts[index::INDEX_FINGER_TIP] = Landmark::new(cx + self.pinch / 2.0, cy, 0.0);

        let wrist = Landmark::new(cx, cy + Self::PALM, 0.0);
        pts[index::WRIST] = wrist;
        pts[index::MIDDLE_FINGER_MCP] = Landmark::new(
            wrist.x + Self::PALM,
            wrist.y + Self::PALM * self.pitch.cos(),
            wrist.z + Self::PALM * self.pitch.sin(),
        );

        let (rs, rc) = self.roll.sin_cos();
        pts[index::INDEX_FINGER_MCP] =
            Landmark::new(cx - Self::KNUCKLE * rc, cy - Self::KNUCKLE * rs, 0.0);
        pts[index::PINKY_MCP] =
            Landmark::new(cx + Self::KNUCKLE * rc, cy + Self::KNUCKLE * rs, 0.0);

        LandmarkSet::new(pts)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::extract;

    const EPS: f32 = 1e-5;

    #[test]
    fn synthetic_hand_roundtrips_through_extractor() {
        let hand = SyntheticHand {
            center_x: 0.3,
            center_y: 0.7,
            pinch: 0.2,
            pitch: 0.4,
            roll: -0.6,
            present: true,
        };
        let pose = extract(&hand.landmarks());
        assert!((pose.target_x - 0.3).abs() < EPS);
        assert!((pose.target_y - 0.7).abs() < EPS);
        assert!((pose.pinch - 0.2).abs() < EPS);
        assert!((pose.rotation.pitch - 0.4).abs() < EPS);
        assert!((pose.rotation.roll + 0.6).abs() < EPS);
    }

    #[test]
    fn flat_synthetic_hand_has_zero_rotation() {
        let pose = extract(&SyntheticHand::default().landmarks());
        assert_eq!(pose.rotation.pitch, 0.0);
        assert_eq!(pose.rotation.yaw, 0.0); // no depth component at pitch 0
        assert_eq!(pose.rotation.roll, 0.0);
    }

    #[test]
    fn sim_source_reports_ready_then_frames() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_tracker_source(SimTrackerSource { rx: sim_rx });

        sim_tx.send(SimInput::Pointer { x: 0.25, y: 0.75 }).unwrap();
        drop(sim_tx);

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events[0], TrackerEvent::CameraReady);
        match &events[1] {
            TrackerEvent::Hand(set) => {
                let pose = extract(set);
                assert!((pose.target_x - 0.25).abs() < EPS);
                assert!((pose.target_y - 0.75).abs() < EPS);
            }
            other => panic!("expected Hand, got {:?}", other),
        }
    }

    #[test]
    fn toggle_hand_produces_no_hand_frames() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_tracker_source(SimTrackerSource { rx: sim_rx });

        sim_tx.send(SimInput::ToggleHand).unwrap();
        sim_tx.send(SimInput::ToggleHand).unwrap();
        drop(sim_tx);

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events[1], TrackerEvent::NoHand);
        assert!(matches!(events[2], TrackerEvent::Hand(_)));
    }

    #[test]
    fn quit_input_forwards_quit() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_tracker_source(SimTrackerSource { rx: sim_rx });

        sim_tx.send(SimInput::Quit).unwrap();
        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events.last(), Some(&TrackerEvent::Quit));
    }

    #[test]
    fn pinch_is_clamped() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_tracker_source(SimTrackerSource { rx: sim_rx });

        sim_tx.send(SimInput::PinchDelta(5.0)).unwrap();
        sim_tx.send(SimInput::PinchDelta(-5.0)).unwrap();
        drop(sim_tx);

        let events: Vec<_> = rx.iter().collect();
        let pinches: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                TrackerEvent::Hand(set) => Some(extract(set).pinch),
                _ => None,
            })
            .collect();
        assert!((pinches[0] - 0.5).abs() < EPS);
        assert!(pinches[1].abs() < EPS);
    }

    #[cfg(feature = "camera")]
    mod sidecar {
        use super::*;

        #[test]
        fn parses_camera_ready() {
            assert_eq!(
                parse_sidecar_line(r#"{"event":"camera_ready"}"#),
                Some(TrackerEvent::CameraReady)
            );
        }

        #[test]
        fn parses_no_hand() {
            assert_eq!(
                parse_sidecar_line(r#"{"hand":null}"#),
                Some(TrackerEvent::NoHand)
            );
        }

        #[test]
        fn parses_hand_frame() {
            let points: Vec<String> = (0..21).map(|i| format!("[0.{}, 0.5, 0.0]", i % 10)).collect();
            let line = format!(r#"{{"hand":[{}]}}"#, points.join(","));
            assert!(matches!(
                parse_sidecar_line(&line),
                Some(TrackerEvent::Hand(_))
            ));
        }

        #[test]
        fn rejects_short_hand_and_garbage() {
            assert_eq!(parse_sidecar_line(r#"{"hand":[[0.1,0.2,0.3]]}"#), None);
            assert_eq!(parse_sidecar_line("not json"), None);
            assert_eq!(parse_sidecar_line(r#"{"event":"unknown"}"#), None);
        }
    }
}
