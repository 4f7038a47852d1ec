//! Fixed-timestep frame driver.
//!
//! Design notes:
//! - Simulation advances in whole ticks of [`FRAME_WAIT_MS`] milliseconds;
//!   rendering happens once per frame no matter how many ticks ran.
//! - Wall-clock backlog past [`MAX_UPDATES`] ticks is dropped, so a long
//!   stall slows the simulation down instead of spiraling it.
//! - Input is sampled once per frame: every tick of that frame sees the
//!   same snapshot, and press/release edges decay when the frame ends.

use std::time::Duration;

use tracing::debug;

use strider_core::input::InputTracker;
use strider_core::render::{RenderBackend, RenderContext};
use strider_core::scene::Scene;
use strider_core::transform::TransformStack;

/// Simulated milliseconds per tick (sixty ticks per second).
pub const FRAME_WAIT_MS: f32 = 1000.0 / 60.0;

/// Most ticks a single frame may run before backlog is dropped.
pub const MAX_UPDATES: u32 = 5;

/// Totals reported by [`FrameLoop::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub frames: u64,
    pub steps: u64,
}

/// Owns a scene and drives it at a fixed simulation rate.
pub struct FrameLoop<S: Scene> {
    scene: S,
    /// Raw input events land here between frames.
    pub tracker: InputTracker,
    transf: TransformStack,
    accumulator_ms: f32,
    frames: u64,
    steps: u64,
}

impl<S: Scene> FrameLoop<S> {
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            tracker: InputTracker::new(),
            transf: TransformStack::new(),
            accumulator_ms: 0.0,
            frames: 0,
            steps: 0,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Advances the simulation by `elapsed_ms` of wall time, then renders
    /// one frame. Returns how many fixed ticks ran.
    pub fn advance(&mut self, elapsed_ms: f32, backend: &mut dyn RenderBackend) -> u32 {
        self.accumulator_ms += elapsed_ms;
        let backlog_cap = MAX_UPDATES as f32 * FRAME_WAIT_MS;
        if self.accumulator_ms > backlog_cap {
            self.accumulator_ms = backlog_cap;
        }

        let input = self.tracker.frame();
        let mut ticks = 0;
        while self.accumulator_ms >= FRAME_WAIT_MS {
            self.scene.update(&input, 1.0);
            self.accumulator_ms -= FRAME_WAIT_MS;
            ticks += 1;
        }
        self.steps += u64::from(ticks);
        self.tracker.post_step();

        let mut ctx = RenderContext::new(backend, &mut self.transf);
        self.scene.draw(&mut ctx);
        self.frames += 1;
        ticks
    }

    /// Runs `frames` frames paced to the fixed rate, calling `feed` before
    /// each frame so the caller can script input.
    pub async fn run<F>(
        &mut self,
        backend: &mut dyn RenderBackend,
        frames: u64,
        mut feed: F,
    ) -> RunReport
    where
        F: FnMut(u64, &mut InputTracker),
    {
        let frame_wait = Duration::from_secs_f32(FRAME_WAIT_MS / 1000.0);
        let mut next_frame = tokio::time::Instant::now();
        let mut last = next_frame;

        for frame in 0..frames {
            feed(frame, &mut self.tracker);

            let now = tokio::time::Instant::now();
            let elapsed_ms = now.duration_since(last).as_secs_f32() * 1000.0;
            last = now;
            self.advance(elapsed_ms, backend);

            next_frame += frame_wait;
            tokio::time::sleep_until(next_frame).await;
        }

        let report = RunReport {
            frames: self.frames,
            steps: self.steps,
        };
        debug!(
            frames = report.frames,
            steps = report.steps,
            "frame loop finished"
        );
        report
    }
}
