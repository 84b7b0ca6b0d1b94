//! Frame-driven game flows on the standard layout
//!
//! These drive the coordinator the way a render loop does: apply a move,
//! then tick fixed frame deltas until the animation has settled.

use game_state::{AnimationSettings, BoardGeometry, GameCoordinator, GameError};

const FRAME: f32 = 1.0 / 60.0;

fn new_game() -> GameCoordinator {
    let geometry = BoardGeometry {
        cell_size: 2.0,
        piece_height: 0.5,
    };
    let mut game = GameCoordinator::new(geometry, AnimationSettings::default());
    game.setup_standard().expect("standard layout fits an empty board");
    game
}

/// Tick frames until nothing moves; returns the frame count.
fn settle(game: &mut GameCoordinator) -> usize {
    let mut frames = 0;
    while game.is_animating() {
        game.advance_animations(FRAME);
        frames += 1;
        assert!(frames < 10_000, "animation never finished");
    }
    frames
}

fn square_of(game: &GameCoordinator, id: &str) -> String {
    let position = game.piece_position(id).expect("piece exists");
    game.position_to_square(position)
        .expect("piece is on the board")
        .to_string()
}

// =============================================================================
// Opening sequence with a capture
// =============================================================================

#[test]
fn test_scandinavian_capture() {
    let mut game = new_game();

    game.apply_move("e2e4").unwrap();
    let frames = settle(&mut game);
    // Two seconds at 60 fps, allowing for float accumulation.
    assert!((119..=121).contains(&frames), "took {frames} frames");
    assert_eq!(square_of(&game, "WHITE_PAWN_5"), "e4");

    game.apply_move("d7d5").unwrap();
    settle(&mut game);
    assert_eq!(square_of(&game, "BLACK_PAWN_4"), "d5");

    let outcome = game.apply_move("e4d5").unwrap();
    assert_eq!(outcome.captured.as_deref(), Some("BLACK_PAWN_4"));
    settle(&mut game);

    assert_eq!(square_of(&game, "WHITE_PAWN_5"), "d5");
    assert_eq!(game.piece_at("d5").unwrap(), Some("WHITE_PAWN_5"));
    assert_eq!(game.active_pieces().count(), 31);
    assert_eq!(game.captured_pieces(), ["BLACK_PAWN_4"]);
    assert_eq!(game.overlapping_pieces(), None);
}

#[test]
fn test_knight_lands_on_board_plane() {
    let mut game = new_game();
    game.apply_move("b8c6").unwrap();

    let mut peak = f32::MIN;
    while game.is_animating() {
        game.advance_animations(FRAME);
        peak = peak.max(game.piece_position("BLACK_KNIGHT_1").unwrap().z);
    }

    assert!(peak > 2.4, "knight should rise well above the board, got {peak}");
    let rest = game.piece_position("BLACK_KNIGHT_1").unwrap();
    assert_eq!(rest, game.square_to_position("c6").unwrap());
}

#[test]
fn test_concurrent_movements_finish_together() {
    let mut game = new_game();
    game.apply_move("e2e4").unwrap();
    game.apply_move("e7e5").unwrap();
    assert_eq!(game.movements().len(), 2);

    game.advance_animations(1.0);
    assert_eq!(game.movements().len(), 2);
    game.advance_animations(1.0);
    assert!(!game.is_animating());

    assert_eq!(square_of(&game, "WHITE_PAWN_5"), "e4");
    assert_eq!(square_of(&game, "BLACK_PAWN_5"), "e5");
}

// =============================================================================
// Rejections during play
// =============================================================================

#[test]
fn test_moves_from_empty_squares_are_rejected() {
    let mut game = new_game();
    assert_eq!(
        game.apply_move("e4e5"),
        Err(GameError::NoPieceAtSquare("e4".into()))
    );
    assert!(!game.is_animating());
    assert!(game.is_white_to_move());
}

#[test]
fn test_piece_cannot_be_moved_twice_mid_flight() {
    let mut game = new_game();
    game.apply_move("g1f3").unwrap();
    game.advance_animations(FRAME);

    // One frame in, the knight is still within tolerance of g1.
    assert_eq!(game.piece_at("g1").unwrap(), Some("WHITE_KNIGHT_2"));
    assert_eq!(
        game.apply_move("g1h3"),
        Err(GameError::PieceInMotion("WHITE_KNIGHT_2".into()))
    );
    settle(&mut game);
    assert_eq!(square_of(&game, "WHITE_KNIGHT_2"), "f3");
}
