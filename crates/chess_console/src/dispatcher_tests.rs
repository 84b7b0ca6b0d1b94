use super::*;
use crate::scene::HeadlessScene;
use game_state::{AnimationSettings, BoardGeometry, Vec3};

/// Engine stand-in: answers every move with a queued reply when polled.
#[derive(Default)]
struct FakeEngine {
    submitted: Vec<String>,
    replies: Vec<Result<String, EngineError>>,
    pending: bool,
    refuse: bool,
    shutdowns: usize,
}

impl EngineLink for FakeEngine {
    fn submit(&mut self, mv: &str) -> Result<(), EngineError> {
        if self.refuse {
            return Err(EngineError::Faulted);
        }
        if self.pending {
            return Err(EngineError::Busy);
        }
        self.submitted.push(mv.to_string());
        self.pending = true;
        Ok(())
    }

    fn try_reply(&mut self) -> Option<Result<String, EngineError>> {
        if !self.pending || self.replies.is_empty() {
            return None;
        }
        self.pending = false;
        Some(self.replies.remove(0))
    }

    fn is_busy(&self) -> bool {
        self.pending
    }

    fn shutdown(&mut self) -> Result<(), EngineError> {
        self.shutdowns += 1;
        Ok(())
    }
}

fn context(engine: FakeEngine) -> GameContext<FakeEngine, HeadlessScene> {
    let mut game = GameCoordinator::new(BoardGeometry::default(), AnimationSettings::default());
    game.setup_standard().unwrap();
    GameContext::new(game, engine, HeadlessScene::default())
}

fn run(ctx: &mut GameContext<FakeEngine, HeadlessScene>, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let flow = ctx.dispatch(line, &mut out).unwrap();
    (flow, String::from_utf8(out).unwrap())
}

fn tick(ctx: &mut GameContext<FakeEngine, HeadlessScene>, delta: f32) -> String {
    let mut out = Vec::new();
    ctx.tick(delta, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Moves
// =============================================================================

#[test]
fn test_move_reaches_game_and_engine() {
    let mut ctx = context(FakeEngine {
        replies: vec![Ok("e7e5".into())],
        ..Default::default()
    });

    let (flow, out) = run(&mut ctx, "move e2e4");
    assert_eq!(flow, Flow::Continue);
    assert_eq!(out, "");
    assert!(ctx.game().is_animating());
    assert_eq!(ctx.engine().submitted, ["e2e4"]);

    assert_eq!(tick(&mut ctx, 0.1), "Engine plays: e7e5\n");
    assert_eq!(tick(&mut ctx, 0.1), "");
}

#[test]
fn test_engine_reply_is_not_applied_to_board() {
    let mut ctx = context(FakeEngine {
        replies: vec![Ok("e7e5".into())],
        ..Default::default()
    });
    run(&mut ctx, "move e2e4");
    tick(&mut ctx, 5.0);

    assert_eq!(ctx.game().piece_at("e7").unwrap(), Some("BLACK_PAWN_5"));
    assert_eq!(ctx.game().piece_at("e4").unwrap(), Some("WHITE_PAWN_5"));
}

#[test]
fn test_invalid_move_is_not_forwarded() {
    let mut ctx = context(FakeEngine::default());

    let (_, out) = run(&mut ctx, "move e2e9");
    assert!(out.starts_with("Invalid command or move:"), "{out}");
    let (_, out) = run(&mut ctx, "move e4e5");
    assert!(out.contains("no piece"), "{out}");

    assert!(ctx.engine().submitted.is_empty());
    assert!(!ctx.game().is_animating());
    assert!(ctx.game().is_white_to_move());
}

#[test]
fn test_busy_engine_blocks_moves() {
    let mut ctx = context(FakeEngine::default());
    run(&mut ctx, "move e2e4");

    let (_, out) = run(&mut ctx, "move d2d4");
    assert!(out.starts_with("Engine is busy"), "{out}");
    assert_eq!(ctx.engine().submitted, ["e2e4"]);
    assert_eq!(ctx.game().movements().len(), 1);
    assert_eq!(ctx.game().piece_at("d2").unwrap(), Some("WHITE_PAWN_4"));
}

#[test]
fn test_engine_failure_reported_distinctly() {
    let mut ctx = context(FakeEngine {
        replies: vec![Err(EngineError::NoMoveFound)],
        ..Default::default()
    });
    run(&mut ctx, "move e2e4");
    let out = tick(&mut ctx, 0.0);
    assert!(out.starts_with("Engine error:"), "{out}");

    let mut ctx = context(FakeEngine {
        refuse: true,
        ..Default::default()
    });
    let (flow, out) = run(&mut ctx, "move e2e4");
    assert_eq!(flow, Flow::Continue);
    assert!(out.starts_with("Engine error:"), "{out}");
}

#[test]
fn test_capture_is_announced() {
    let mut ctx = context(FakeEngine {
        replies: vec![Ok("a7a6".into()), Ok("a6a5".into()), Ok("h7h6".into())],
        ..Default::default()
    });
    for mv in ["move e2e4", "move d7d5"] {
        run(&mut ctx, mv);
        tick(&mut ctx, 5.0);
    }
    let (_, out) = run(&mut ctx, "move e4d5");
    assert_eq!(out, "Captured BLACK_PAWN_4\n");
    tick(&mut ctx, 5.0);
    assert_eq!(ctx.scene().visible_pieces, 31);
}

// =============================================================================
// Scene commands
// =============================================================================

#[test]
fn test_camera_reaches_scene() {
    let mut ctx = context(FakeEngine::default());
    let (_, out) = run(&mut ctx, "camera 45 180 20");
    assert_eq!(out, "Camera set to: 45, 180, 20\n");
    assert_eq!(ctx.scene().camera, crate::scene::Spherical::new(45.0, 180.0, 20.0));
}

#[test]
fn test_light_is_converted_to_cartesian() {
    let mut ctx = context(FakeEngine::default());
    let (_, out) = run(&mut ctx, "light 10 0 15");
    assert!(out.starts_with("Light position set to: "), "{out}");

    let expected = crate::scene::Spherical::new(10.0, 0.0, 15.0).to_cartesian();
    assert_eq!(ctx.scene().light_position, expected);
    assert!(ctx.scene().light_position.distance(Vec3::ZERO) > 14.9);
}

#[test]
fn test_power_is_normalized() {
    let mut ctx = context(FakeEngine::default());
    let (_, out) = run(&mut ctx, "power 40");
    assert_eq!(out, "Light power set to: 40\n");
    assert!((ctx.scene().light_power - 0.4).abs() < 1e-6);
}

#[test]
fn test_invalid_scene_commands_change_nothing() {
    let mut ctx = context(FakeEngine::default());
    let before = ctx.scene().clone();
    for line in ["camera 5 0 1", "light 45 90 0", "power 120", "zoom 3", ""] {
        let (flow, out) = run(&mut ctx, line);
        assert_eq!(flow, Flow::Continue);
        assert!(out.starts_with("Invalid command or move:"), "{line:?}: {out}");
    }
    assert_eq!(*ctx.scene(), before);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_quit() {
    let mut ctx = context(FakeEngine::default());
    let (flow, out) = run(&mut ctx, "quit");
    assert_eq!(flow, Flow::Quit);
    assert_eq!(out, "Thanks for playing!!\n");
}

#[test]
fn test_idle_tracks_engine_and_animation() {
    let mut ctx = context(FakeEngine {
        replies: vec![Ok("e7e5".into())],
        ..Default::default()
    });
    assert!(ctx.is_idle());
    run(&mut ctx, "move e2e4");
    assert!(!ctx.is_idle());
    tick(&mut ctx, 0.5);
    assert!(!ctx.is_idle(), "pawn still moving");
    tick(&mut ctx, 5.0);
    assert!(ctx.is_idle());
}

#[test]
fn test_shutdown_once() {
    let mut ctx = context(FakeEngine::default());
    ctx.shutdown().unwrap();
    ctx.shutdown().unwrap();
    assert_eq!(ctx.engine().shutdowns, 1);
}
