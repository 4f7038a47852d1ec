//! Configuration system.
//!
//! Loads simulation configuration from JSON strings (file IO left to
//! the app). Every field has a default, so `{}` and partial sections
//! are valid configs.

use serde::{Deserialize, Serialize};

use crate::math::Vector3;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub terrain: TerrainConfig,
    pub player: PlayerConfig,
    pub atmosphere: AtmosphereConfig,
    pub camera: CameraConfig,
}

impl SimConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Terrain generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid resolution per side.
    pub size: usize,
    /// World-space edge length of the terrain square.
    pub scale: f32,
    /// Elevation amplitude applied to the noise field.
    pub amplitude: f32,
    pub seed: i64,
    /// Noise upsample factor; must divide `size`.
    pub upsample: usize,
    pub blur_passes: u32,
    pub color: [f32; 3],
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: 64,
            scale: 10.0,
            amplitude: 1.25,
            seed: 12345,
            upsample: 4,
            blur_passes: 2,
            color: [0.33, 0.55, 0.27],
        }
    }
}

/// Player movement tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: Vector3,
    pub move_speed: f32,
    /// Per-axis velocity damping per simulation step.
    pub friction: Vector3,
    /// Terminal fall speed (negative, Y-up).
    pub gravity_target: f32,
    pub jump_impulse: f32,
    /// Steps the held-jump ramp lasts.
    pub jump_time: f32,
    /// Pitch is clamped to the horizon plus/minus this many radians.
    pub pitch_range: f32,
    pub eye_height: f32,
    /// Collision radius; carried for future footprint checks.
    pub radius: f32,
    pub mouse_sensitivity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Vector3::new(0.4, 2.0, 0.2),
            move_speed: 0.033,
            friction: Vector3::new(0.0033, 0.0033, 0.0033),
            gravity_target: -0.15,
            jump_impulse: 0.06,
            jump_time: 15.0,
            pitch_range: 1.2,
            eye_height: 0.25,
            radius: 0.225,
            mouse_sensitivity: 0.005,
        }
    }
}

/// Clear color, fog and directional light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    pub clear_color: [f32; 3],
    pub fog_color: [f32; 4],
    pub fog_density: f32,
    pub light_direction: Vector3,
    pub light_magnitude: f32,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.70, 0.70, 0.70],
            fog_color: [0.70, 0.70, 0.70, 1.0],
            fog_density: 0.15,
            light_direction: Vector3::new(1.0, -1.0, 0.5),
            light_magnitude: 0.8,
        }
    }
}

/// Perspective projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Width over height of the target surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y: 70.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg = SimConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, SimConfig::default());
        assert_eq!(cfg.terrain.size, 64);
        assert_eq!(cfg.player.move_speed, 0.033);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = SimConfig::from_json_str(
            r#"{
                "terrain": { "size": 32, "seed": 7 },
                "camera": { "fov_y": 90.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.terrain.size, 32);
        assert_eq!(cfg.terrain.seed, 7);
        assert_eq!(cfg.terrain.scale, 10.0);
        assert_eq!(cfg.camera.fov_y, 90.0);
        assert_eq!(cfg.camera.near, 0.1);
        assert_eq!(cfg.player, PlayerConfig::default());
    }

    #[test]
    fn round_trips_through_json() {
        let mut cfg = SimConfig::default();
        cfg.player.start = Vector3::new(1.0, 4.0, -2.0);
        cfg.terrain.blur_passes = 5;

        let text = serde_json::to_string(&cfg).unwrap();
        let back = SimConfig::from_json_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json_str("{ terrain: }").is_err());
    }
}
