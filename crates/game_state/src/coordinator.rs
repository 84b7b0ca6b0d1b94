//! Authoritative game state: where every piece is and what is moving.

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::error::{GameError, GameResult};
use crate::layout::standard_layout;
use crate::movement::{AnimationSettings, Movement};
use crate::registry::PieceRegistry;
use crate::square::{BoardGeometry, Square};

/// Called with the identifier of every captured piece.
pub type CaptureObserver = Box<dyn FnMut(&str) + Send>;

/// What a successful [`GameCoordinator::apply_move`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: String,
    pub from: Square,
    pub to: Square,
    pub captured: Option<String>,
}

/// Owns the piece registry and the active movements.
///
/// Moves are validated for shape only. Nothing here knows the rules of chess:
/// [`is_checkmate`](Self::is_checkmate) always answers `false`.
pub struct GameCoordinator {
    geometry: BoardGeometry,
    settings: AnimationSettings,
    registry: PieceRegistry,
    movements: Vec<Movement>,
    captured: Vec<String>,
    white_to_move: bool,
    on_capture: Option<CaptureObserver>,
}

impl GameCoordinator {
    pub fn new(geometry: BoardGeometry, settings: AnimationSettings) -> Self {
        Self {
            geometry,
            settings,
            registry: PieceRegistry::new(),
            movements: Vec::new(),
            captured: Vec::new(),
            white_to_move: true,
            on_capture: None,
        }
    }

    /// Place the 32 pieces of the opening position.
    pub fn setup_standard(&mut self) -> GameResult<()> {
        for (id, square) in standard_layout() {
            self.place_piece(&id, &square.to_string())?;
        }
        Ok(())
    }

    pub fn set_capture_observer(&mut self, observer: impl FnMut(&str) + Send + 'static) {
        self.on_capture = Some(Box::new(observer));
    }

    /// Put a new piece on an empty square.
    pub fn place_piece(&mut self, id: &str, square: &str) -> GameResult<()> {
        let position = self.geometry.square_to_position(square)?;
        if self
            .registry
            .pieces_near(position, self.settings.tolerance)
            .next()
            .is_some()
        {
            return Err(GameError::SquareOccupied(square.to_string()));
        }
        self.registry.insert(id, position)
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn square_to_position(&self, square: &str) -> GameResult<Vec3> {
        self.geometry.square_to_position(square)
    }

    pub fn position_to_square(&self, position: Vec3) -> Option<Square> {
        self.geometry.position_to_square(position)
    }

    /// Identifier of the uncaptured piece standing on `square`, if any.
    pub fn piece_at(&self, square: &str) -> GameResult<Option<&str>> {
        let position = self.geometry.square_to_position(square)?;
        Ok(self
            .registry
            .pieces_near(position, self.settings.tolerance)
            .next())
    }

    /// Apply a coordinate move such as `e2e4`.
    ///
    /// On success a [`Movement`] is queued, a piece resting on the target is
    /// flagged captured (and the observer told) and the side to move flips.
    /// A target that an animating piece is headed for is rejected with
    /// [`GameError::SquareOccupied`]. On failure nothing changes.
    pub fn apply_move(&mut self, move_text: &str) -> GameResult<MoveOutcome> {
        let (from, to) = parse_move(move_text)?;
        let start = self.geometry.position_of(from);
        let end = self.geometry.position_of(to);
        let tolerance = self.settings.tolerance;

        let piece = self
            .registry
            .pieces_near(start, tolerance)
            .next()
            .ok_or_else(|| GameError::NoPieceAtSquare(from.to_string()))?
            .to_string();
        if self.is_moving(&piece) {
            return Err(GameError::PieceInMotion(piece));
        }
        // The square another piece is still travelling to counts as taken.
        if self
            .movements
            .iter()
            .any(|m| m.end.distance(end) < tolerance)
        {
            return Err(GameError::SquareOccupied(to.to_string()));
        }

        // Pieces in flight are leaving their square and cannot be taken on it.
        let captured = self
            .registry
            .pieces_near(end, tolerance)
            .find(|id| *id != piece && !self.is_moving(id))
            .map(str::to_string);
        if let Some(victim) = &captured {
            self.registry.mark_captured(victim);
            self.captured.push(victim.clone());
            info!(piece = %victim, square = %to, "piece captured");
            if let Some(observer) = self.on_capture.as_mut() {
                observer(victim);
            }
        }

        self.movements.push(Movement {
            piece_id: piece.clone(),
            start,
            end,
            progress: 0.0,
            is_arcing: self.settings.is_knight(&piece),
            is_capture: captured.is_some(),
        });
        self.white_to_move = !self.white_to_move;
        debug!(%piece, %from, %to, "move applied");

        Ok(MoveOutcome {
            piece,
            from,
            to,
            captured,
        })
    }

    /// Advance every movement by `delta` seconds and write the new positions
    /// back into the registry. Finished movements are dropped in the same pass.
    pub fn advance_animations(&mut self, delta: f32) {
        if self.movements.is_empty() {
            return;
        }
        let duration = self.settings.movement_duration;
        let arc_height = self.settings.knight_arc_height;
        for movement in &mut self.movements {
            movement.advance(delta, duration);
            self.registry
                .set_position(&movement.piece_id, movement.current_position(arc_height));
        }
        self.movements.retain(|m| !m.is_complete());

        if self.movements.is_empty() {
            if let Some((a, b)) = self.overlapping_pieces() {
                warn!(first = %a, second = %b, "two pieces at rest on the same square");
            }
        }
    }

    fn is_moving(&self, id: &str) -> bool {
        self.movements.iter().any(|m| m.piece_id == id)
    }

    pub fn is_animating(&self) -> bool {
        !self.movements.is_empty()
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Current (possibly mid-animation) position of a piece.
    pub fn piece_position(&self, id: &str) -> Option<Vec3> {
        self.registry.position(id)
    }

    pub fn is_captured(&self, id: &str) -> bool {
        self.registry.get(id).is_some_and(|p| p.captured)
    }

    /// Captured piece identifiers in capture order.
    pub fn captured_pieces(&self) -> &[String] {
        &self.captured
    }

    /// Pieces still on the board, for rendering.
    pub fn active_pieces(&self) -> impl Iterator<Item = (&str, Vec3)> {
        self.registry.active()
    }

    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }

    pub fn is_white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// Not implemented: no chess rules are modelled, so never true.
    pub fn is_checkmate(&self) -> bool {
        false
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate()
    }

    /// First pair of resting pieces closer than the tolerance, if any.
    pub fn overlapping_pieces(&self) -> Option<(String, String)> {
        let tolerance = self.settings.tolerance;
        let resting: Vec<(&str, Vec3)> = self
            .registry
            .active()
            .filter(|(id, _)| !self.movements.iter().any(|m| m.piece_id == *id))
            .collect();
        for (i, (a, pa)) in resting.iter().enumerate() {
            for (b, pb) in &resting[i + 1..] {
                if pa.distance(*pb) < tolerance {
                    return Some((a.to_string(), b.to_string()));
                }
            }
        }
        None
    }
}

/// Split `e2e4` into two distinct squares.
fn parse_move(text: &str) -> GameResult<(Square, Square)> {
    let invalid = || GameError::InvalidMove(text.to_string());
    if text.len() != 4 {
        return Err(invalid());
    }
    let from: Square = text
        .get(0..2)
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())?;
    let to: Square = text
        .get(2..4)
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())?;
    if from == to {
        return Err(invalid());
    }
    Ok((from, to))
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;
