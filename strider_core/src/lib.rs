//! `strider_core`
//!
//! Simulation library for the terrain walker: math, transform stack,
//! heightfield terrain, collision, player and the renderer
//! abstraction.
//!
//! Design goals:
//! - Deterministic, synchronous core; the frame loop lives in the app.
//! - Renderer behind a trait; everything runs headless.
//! - Degenerate geometry handled by policy, not by panics.
//! - No `unsafe`.

pub mod config;
pub mod heightmap;
pub mod input;
pub mod math;
pub mod mesh;
pub mod noise;
pub mod player;
pub mod render;
pub mod scene;
pub mod terrain;
pub mod transform;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::heightmap::*;
    pub use crate::input::*;
    pub use crate::math::*;
    pub use crate::mesh::*;
    pub use crate::player::*;
    pub use crate::render::*;
    pub use crate::scene::*;
    pub use crate::terrain::*;
    pub use crate::transform::*;
}
