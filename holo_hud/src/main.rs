//! holo_hud — interactive entry point.

use holo_hud::app::{run, AppConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Holo Hand — Kinetic Holographic Interface           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: camera capture via MediaPipe sidecar");
    #[cfg(not(feature = "camera"))]
    println!("  Mode: mouse/keyboard simulation  (use --features camera for capture)");
    println!();

    let cfg = configure_from_args();

    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_from_args() -> AppConfig {
    let mut cfg = AppConfig::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => {
                if let Some(v) = args.next().and_then(|v| v.parse().ok()) {
                    cfg.width = v;
                }
            }
            "--height" => {
                if let Some(v) = args.next().and_then(|v| v.parse().ok()) {
                    cfg.height = v;
                }
            }
            "--sidecar" => {
                if let Some(v) = args.next() {
                    cfg.sidecar_program = v;
                }
            }
            other => {
                eprintln!("  Ignoring unknown argument: {}", other);
            }
        }
    }
    cfg.width = cfg.width.clamp(320, 3840);
    cfg.height = cfg.height.clamp(240, 2160);
    cfg
}
