//! Shared scenario builders for the strider integration tests.

use strider_core::config::{SimConfig, TerrainConfig};
use strider_core::input::InputFrame;
use strider_core::scene::{GameScene, Scene};

/// Small world with zero noise amplitude: every vertex sits at height
/// zero, so landings resolve to exact coordinates.
pub fn flat_world(size: usize, scale: f32) -> SimConfig {
    SimConfig {
        terrain: TerrainConfig {
            size,
            scale,
            amplitude: 0.0,
            upsample: 1,
            blur_passes: 0,
            ..TerrainConfig::default()
        },
        ..SimConfig::default()
    }
}

/// Small rolling world using the stock noise pipeline.
pub fn rolling_world(seed: i64) -> SimConfig {
    SimConfig {
        terrain: TerrainConfig {
            size: 16,
            seed,
            ..TerrainConfig::default()
        },
        ..SimConfig::default()
    }
}

/// Runs `ticks` fixed updates with nothing held.
pub fn run_idle(scene: &mut GameScene, ticks: u32) {
    let input = InputFrame::default();
    for _ in 0..ticks {
        scene.update(&input, 1.0);
    }
}
