//! End-to-end player-on-terrain scenarios.

use strider_app::runner::FrameLoop;
use strider_core::input::{Action, InputTracker};
use strider_core::render::NullRenderer;
use strider_core::scene::{GameScene, Scene};
use strider_tests::{flat_world, rolling_world, run_idle};

/// Spawned above flat ground, the player falls, lands exactly on the
/// surface, and stays put.
#[test]
fn falling_player_lands_exactly_on_flat_ground() -> anyhow::Result<()> {
    let mut scene = GameScene::new(&flat_world(16, 8.0))?;
    run_idle(&mut scene, 200);

    let player = scene.player();
    assert_eq!(player.pos.y, 0.0);
    assert_eq!(player.speed.y, 0.0);
    assert!(player.can_jump());
    Ok(())
}

/// Holding the forward key walks the player along +z while collision
/// keeps it glued to the ground plane.
#[test]
fn held_forward_key_walks_the_player_forward() -> anyhow::Result<()> {
    let mut scene = GameScene::new(&flat_world(16, 8.0))?;
    run_idle(&mut scene, 200);

    let mut tracker = InputTracker::new();
    tracker.key_down(Action::MoveForward);
    let start_x = scene.player().pos.x;
    for _ in 0..100 {
        let input = tracker.frame();
        scene.update(&input, 1.0);
        tracker.post_step();
        assert_eq!(scene.player().pos.y, 0.0);
    }

    let player = scene.player();
    assert!(
        player.pos.z > 1.0,
        "expected forward travel, got z = {}",
        player.pos.z
    );
    assert!((player.pos.x - start_x).abs() < 1e-3);
    Ok(())
}

/// A jump rises while held and comes back to rest exactly on the
/// surface.
#[test]
fn jump_rises_then_returns_to_rest() -> anyhow::Result<()> {
    let mut scene = GameScene::new(&flat_world(16, 8.0))?;
    run_idle(&mut scene, 200);

    let mut tracker = InputTracker::new();
    tracker.key_down(Action::Jump);
    let mut peak = 0.0_f32;
    for frame in 0..400 {
        if frame == 20 {
            tracker.key_up(Action::Jump);
        }
        let input = tracker.frame();
        scene.update(&input, 1.0);
        tracker.post_step();
        peak = peak.max(scene.player().pos.y);
    }

    assert!(peak > 0.5, "jump should gain height, peaked at {}", peak);
    let player = scene.player();
    assert_eq!(player.pos.y, 0.0);
    assert_eq!(player.speed.y, 0.0);
    assert!(player.can_jump());
    Ok(())
}

/// Two scenes built from the same config replay identically; a
/// different seed produces different ground.
#[test]
fn identical_seeds_reproduce_identical_runs() -> anyhow::Result<()> {
    let cfg = rolling_world(99);
    let mut a = GameScene::new(&cfg)?;
    let mut b = GameScene::new(&cfg)?;

    let mut tracker_a = InputTracker::new();
    let mut tracker_b = InputTracker::new();
    tracker_a.key_down(Action::MoveForward);
    tracker_b.key_down(Action::MoveForward);
    for _ in 0..120 {
        a.update(&tracker_a.frame(), 1.0);
        b.update(&tracker_b.frame(), 1.0);
        tracker_a.post_step();
        tracker_b.post_step();
    }

    assert_eq!(a.player().pos, b.player().pos);
    assert_eq!(a.terrain().mesh_data(), b.terrain().mesh_data());

    let other = GameScene::new(&rolling_world(7))?;
    assert_ne!(
        other.terrain().mesh_data().positions,
        a.terrain().mesh_data().positions
    );
    Ok(())
}

/// Full integration: the paced frame loop drives a scene end to end
/// while scripted input walks the player.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn paced_scripted_walk_lands_and_travels() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();

    let scene = GameScene::new(&flat_world(16, 8.0))?;
    let mut frame_loop = FrameLoop::new(scene);
    let mut backend = NullRenderer::default();

    let report = frame_loop
        .run(&mut backend, 90, |frame, tracker| {
            if frame == 0 {
                tracker.key_down(Action::MoveForward);
            }
        })
        .await;

    assert_eq!(report.frames, 90);
    assert!(
        report.steps >= 60,
        "expected most frames to tick, got {}",
        report.steps
    );

    let player = frame_loop.scene().player();
    assert_eq!(player.pos.y, 0.0, "player should rest on the ground");
    assert!(
        player.pos.z > 0.3,
        "expected forward travel, got z = {}",
        player.pos.z
    );
    Ok(())
}
