//! `strider_app`
//!
//! Application-side systems:
//! - Fixed-timestep frame loop with backlog capping
//! - Paced headless runs over any [`strider_core::render::RenderBackend`]
//! - The `strider` binary (config loading, logging, scripted demo input)

pub mod runner;

pub use runner::{FrameLoop, RunReport, FRAME_WAIT_MS, MAX_UPDATES};
