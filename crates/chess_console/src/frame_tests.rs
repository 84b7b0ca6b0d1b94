use super::*;
use crate::scene::HeadlessScene;
use game_state::{AnimationSettings, BoardGeometry, GameCoordinator};
use tokio::sync::mpsc;
use uci_client::EngineError;

/// Replies to each move after a fixed number of polls.
struct EchoEngine {
    pending: Option<(String, u32)>,
    delay: u32,
}

impl EngineLink for EchoEngine {
    fn submit(&mut self, mv: &str) -> Result<(), EngineError> {
        if self.pending.is_some() {
            return Err(EngineError::Busy);
        }
        self.pending = Some((mv.to_string(), self.delay));
        Ok(())
    }

    fn try_reply(&mut self) -> Option<Result<String, EngineError>> {
        let (mv, polls) = self.pending.as_mut()?;
        if *polls > 0 {
            *polls -= 1;
            return None;
        }
        let reply = format!("{}{}", &mv[2..4], &mv[0..2]);
        self.pending = None;
        Some(Ok(reply))
    }

    fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    fn shutdown(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

fn context(delay: u32) -> GameContext<EchoEngine, HeadlessScene> {
    let settings = AnimationSettings {
        movement_duration: 0.05,
        ..Default::default()
    };
    let mut game = GameCoordinator::new(BoardGeometry::default(), settings);
    game.setup_standard().unwrap();
    GameContext::new(
        game,
        EchoEngine {
            pending: None,
            delay,
        },
        HeadlessScene::default(),
    )
}

fn input(lines: &[&str]) -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    for line in lines {
        tx.send(line.to_string()).unwrap();
    }
    rx
}

#[test]
fn test_frame_loop_paces_ticks() {
    let mut frames = FrameLoop::new(100);
    assert_eq!(frames.period(), Duration::from_millis(10));

    let start = Instant::now();
    let mut total = 0.0;
    for _ in 0..5 {
        total += frames.wait();
    }
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(45), "{elapsed:?}");
    assert!(total > 0.04, "{total}");
}

#[test]
fn test_zero_fps_does_not_panic() {
    let frames = FrameLoop::new(0);
    assert_eq!(frames.period(), Duration::from_secs(1));
}

#[test]
fn test_run_stops_on_quit() {
    let mut ctx = context(0);
    let (tx, mut lines) = mpsc::unbounded_channel();
    tx.send("bogus".to_string()).unwrap();
    tx.send("quit".to_string()).unwrap();
    let mut out = Vec::new();

    // The sender stays alive, so only `quit` can end the loop.
    run(&mut ctx, &mut lines, &mut FrameLoop::new(1000), &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    assert_eq!(
        out,
        "Invalid command or move: unknown command 'bogus'\nThanks for playing!!\n"
    );
    drop(tx);
}

#[test]
fn test_run_drains_pending_work_at_end_of_input() {
    let mut ctx = context(20);
    let mut lines = input(&["move e2e4"]);
    let mut out = Vec::new();

    run(&mut ctx, &mut lines, &mut FrameLoop::new(1000), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Engine plays: e4e2\n");
    assert!(ctx.is_idle());
    assert_eq!(ctx.game().piece_at("e4").unwrap(), Some("WHITE_PAWN_5"));
    assert!(ctx.scene().frames_drawn > 20);
}

#[test]
fn test_run_with_no_input_exits() {
    let mut ctx = context(0);
    let mut lines = input(&[]);
    let mut out = Vec::new();
    run(&mut ctx, &mut lines, &mut FrameLoop::new(1000), &mut out).unwrap();
    assert!(out.is_empty());
}
