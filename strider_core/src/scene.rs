//! Scenes.
//!
//! A scene couples simulation state with drawing. `GameScene` is the
//! terrain walk: player step, terrain collision, then a fogged and lit
//! terrain pass from the player's eyes.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::SimConfig;
use crate::heightmap::Heightmap;
use crate::input::InputFrame;
use crate::math::Vector3;
use crate::noise;
use crate::player::Player;
use crate::render::{RenderContext, ShaderKind};
use crate::terrain::Terrain;

/// One simulated-and-drawn screen of the application.
pub trait Scene {
    /// Advances simulation by one fixed step.
    fn update(&mut self, input: &InputFrame, step: f32);
    /// Emits the draw calls for the current frame.
    fn draw(&mut self, ctx: &mut RenderContext);
}

/// First-person walk over procedurally generated terrain.
pub struct GameScene {
    player: Player,
    terrain: Terrain,
    cfg: SimConfig,
}

impl GameScene {
    /// Generates the terrain from the configured noise parameters and
    /// spawns the player.
    pub fn new(cfg: &SimConfig) -> Result<Self> {
        let t = &cfg.terrain;

        let field = noise::value_noise(t.size, t.size, t.upsample, t.blur_passes, t.seed)
            .context("generating terrain noise")?;
        let map = Heightmap::from_noise(t.size, t.size, &field, t.amplitude)
            .context("building terrain heightmap")?;
        let color = Vector3::new(t.color[0], t.color[1], t.color[2]);
        let terrain = Terrain::new(&map, color, t.scale).context("building terrain")?;

        info!(size = t.size, seed = t.seed, scale = t.scale, "game scene ready");

        Ok(Self {
            player: Player::new(&cfg.player),
            terrain,
            cfg: cfg.clone(),
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }
}

impl Scene for GameScene {
    fn update(&mut self, input: &InputFrame, step: f32) {
        self.player.update(input, step);
        if self
            .terrain
            .player_collision(&mut self.player.pos, &mut self.player.speed)
        {
            self.player.land();
        }
    }

    fn draw(&mut self, ctx: &mut RenderContext) {
        let atmosphere = &self.cfg.atmosphere;
        let camera = &self.cfg.camera;

        ctx.backend.clear(
            atmosphere.clear_color[0],
            atmosphere.clear_color[1],
            atmosphere.clear_color[2],
        );

        ctx.transf.load_identity();
        ctx.transf
            .set_perspective(camera.fov_y, camera.aspect, camera.near, camera.far);
        self.player.position_camera(ctx.transf);

        ctx.backend.bind_shader(ShaderKind::TexturedFogLight);
        ctx.apply_transform();

        ctx.backend.set_color(1.0, 1.0, 1.0, 1.0);
        ctx.backend.set_fog(
            atmosphere.fog_color[0],
            atmosphere.fog_color[1],
            atmosphere.fog_color[2],
            atmosphere.fog_color[3],
            atmosphere.fog_density,
        );
        ctx.backend
            .set_light(atmosphere.light_direction, atmosphere.light_magnitude);

        self.terrain.draw(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputTracker;
    use crate::render::{RecordingRenderer, RenderOp};
    use crate::transform::TransformStack;

    fn flat_scene() -> GameScene {
        let mut cfg = SimConfig::default();
        cfg.terrain.size = 16;
        cfg.terrain.amplitude = 0.0;
        GameScene::new(&cfg).unwrap()
    }

    #[test]
    fn player_falls_and_lands_on_the_surface() {
        let mut scene = flat_scene();
        let tracker = InputTracker::new();

        for _ in 0..200 {
            scene.update(&tracker.frame(), 1.0);
        }

        let player = scene.player();
        assert_eq!(player.pos.y, 0.0);
        assert_eq!(player.speed.y, 0.0);
        assert!(player.can_jump());
    }

    #[test]
    fn grounded_player_can_jump_back_up() {
        let mut scene = flat_scene();
        let mut tracker = InputTracker::new();

        for _ in 0..200 {
            scene.update(&tracker.frame(), 1.0);
        }

        tracker.key_down(crate::input::Action::Jump);
        scene.update(&tracker.frame(), 1.0);

        assert!(scene.player().speed.y > 0.0);
        assert!(scene.player().pos.y > 0.0);
    }

    #[test]
    fn draw_stream_uploads_the_mesh_once() {
        let mut scene = flat_scene();
        let mut backend = RecordingRenderer::new();
        let mut transf = TransformStack::new();

        let mut ctx = RenderContext::new(&mut backend, &mut transf);
        scene.draw(&mut ctx);
        scene.draw(&mut ctx);

        assert_eq!(
            backend.count_ops(|op| matches!(op, RenderOp::CreateMesh(_))),
            1
        );
        assert_eq!(
            backend.count_ops(|op| matches!(op, RenderOp::DrawMesh(_))),
            2
        );
        assert_eq!(backend.count_ops(|op| matches!(op, RenderOp::Clear(..))), 2);
        // Same logical program across frames: bound exactly once.
        assert_eq!(
            backend.count_ops(|op| matches!(op, RenderOp::BindShader(_))),
            1
        );
    }

    #[test]
    fn degenerate_terrain_config_fails_construction() {
        let mut cfg = SimConfig::default();
        cfg.terrain.size = 10;
        cfg.terrain.upsample = 4;
        assert!(GameScene::new(&cfg).is_err());
    }
}
