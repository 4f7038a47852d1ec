//! Draw-stream shape checks against the recording backend.

use anyhow::Context;
use strider_app::runner::{FrameLoop, FRAME_WAIT_MS};
use strider_core::render::{MeshHandle, RecordingRenderer, RenderOp};
use strider_core::scene::GameScene;
use strider_tests::flat_world;

/// Driving a scene through the frame loop uploads the terrain mesh once
/// and replays the per-frame stream after that.
#[test]
fn frame_loop_uploads_the_mesh_once() -> anyhow::Result<()> {
    let scene = GameScene::new(&flat_world(4, 2.0))?;
    let mut frame_loop = FrameLoop::new(scene);
    let mut backend = RecordingRenderer::new();

    for _ in 0..3 {
        frame_loop.advance(FRAME_WAIT_MS, &mut backend);
    }

    assert_eq!(
        backend.count_ops(|op| matches!(op, RenderOp::CreateMesh(_))),
        1
    );
    assert_eq!(
        backend.count_ops(|op| matches!(op, RenderOp::DrawMesh(_))),
        3
    );
    assert_eq!(backend.count_ops(|op| matches!(op, RenderOp::Clear(..))), 3);
    // Shader and texture binds are cached across frames.
    assert_eq!(
        backend.count_ops(|op| matches!(op, RenderOp::BindShader(_))),
        1
    );
    assert_eq!(
        backend.count_ops(|op| matches!(op, RenderOp::BindTexture(_))),
        1
    );
    Ok(())
}

/// The uploaded mesh for a small flat world is a full grid with every
/// normal pointing straight up.
#[test]
fn flat_world_mesh_has_up_normals() -> anyhow::Result<()> {
    let scene = GameScene::new(&flat_world(4, 2.0))?;
    let mut frame_loop = FrameLoop::new(scene);
    let mut backend = RecordingRenderer::new();
    frame_loop.advance(FRAME_WAIT_MS, &mut backend);

    let mesh = backend
        .mesh_data(MeshHandle(0))
        .context("terrain mesh was never uploaded")?;
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.indices.len(), 54);
    for i in 0..mesh.vertex_count() {
        assert_eq!(mesh.normal(i), (0.0, 1.0, 0.0));
    }
    Ok(())
}
