//! Headless simulation binary.
//!
//! Usage:
//!   cargo run -p strider_app -- [--config sim.json] [--size 64] [--seed 12345] [--frames 600]
//!
//! Builds the terrain scene, then runs the frame loop against the null
//! renderer for a fixed number of frames while a small script walks the
//! player forward, hops every four seconds, and slowly pans the view.
//! Logs where the player ended up.

use std::env;
use std::fs;

use anyhow::Context;
use strider_app::runner::FrameLoop;
use strider_core::config::SimConfig;
use strider_core::input::{Action, InputTracker};
use strider_core::render::NullRenderer;
use strider_core::scene::GameScene;
use tracing::info;

struct AppOptions {
    cfg: SimConfig,
    frames: u64,
}

fn parse_args() -> anyhow::Result<AppOptions> {
    let mut opts = AppOptions {
        cfg: SimConfig::default(),
        frames: 600,
    };
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                let text = fs::read_to_string(&args[i + 1])
                    .with_context(|| format!("reading config {}", args[i + 1]))?;
                opts.cfg = SimConfig::from_json_str(&text)
                    .with_context(|| format!("parsing config {}", args[i + 1]))?;
                i += 2;
            }
            "--size" if i + 1 < args.len() => {
                opts.cfg.terrain.size = args[i + 1].parse().context("parsing --size")?;
                i += 2;
            }
            "--seed" if i + 1 < args.len() => {
                opts.cfg.terrain.seed = args[i + 1].parse().context("parsing --seed")?;
                i += 2;
            }
            "--frames" if i + 1 < args.len() => {
                opts.frames = args[i + 1].parse().context("parsing --frames")?;
                i += 2;
            }
            _ => i += 1,
        }
    }
    Ok(opts)
}

/// Scripted input: settle for a second, then walk forward, hop every
/// four seconds, and pan the view slowly to the right.
fn demo_input(frame: u64, tracker: &mut InputTracker) {
    if frame == 60 {
        tracker.key_down(Action::MoveForward);
    }
    match frame % 240 {
        120 => tracker.key_down(Action::Jump),
        140 => tracker.key_up(Action::Jump),
        _ => {}
    }
    if frame >= 60 {
        tracker.add_mouse_delta(1.5, 0.0);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let opts = parse_args()?;
    info!(
        size = opts.cfg.terrain.size,
        seed = opts.cfg.terrain.seed,
        frames = opts.frames,
        "Starting strider"
    );

    let scene = GameScene::new(&opts.cfg).context("building scene")?;
    let mut frame_loop = FrameLoop::new(scene);
    let mut backend = NullRenderer::default();

    let report = frame_loop.run(&mut backend, opts.frames, demo_input).await;

    let player = frame_loop.scene().player();
    info!(
        frames = report.frames,
        steps = report.steps,
        x = %player.pos.x,
        y = %player.pos.y,
        z = %player.pos.z,
        "Run complete"
    );

    Ok(())
}
