use strider_app::runner::FrameLoop;
use strider_core::render::NullRenderer;
use strider_core::scene::GameScene;
use strider_tests::rolling_world;

/// Smoke test: the paced loop drives a freshly built scene for a few
/// frames without panicking.
#[tokio::test]
async fn paced_loop_runs_a_fresh_scene() -> anyhow::Result<()> {
    let scene = GameScene::new(&rolling_world(42))?;
    let mut frame_loop = FrameLoop::new(scene);
    let mut backend = NullRenderer::default();

    let report = frame_loop.run(&mut backend, 5, |_, _| {}).await;
    assert_eq!(report.frames, 5);
    Ok(())
}
