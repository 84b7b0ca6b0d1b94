//! Board squares and their mapping to world positions.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// A board square, file and rank both in `0..8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// All 64 squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square { file, rank }))
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return Err(GameError::InvalidSquare(s.to_string()));
        }
        Ok(Square {
            file: b[0] - b'a',
            rank: b[1] - b'1',
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        write!(f, "{file}{rank}")
    }
}

/// Size and height of the board in world units.
///
/// The 8x8 board is centered on the origin; pieces rest on the plane
/// `z = piece_height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardGeometry {
    /// Edge length of one square
    pub cell_size: f32,
    pub piece_height: f32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            piece_height: 0.0,
        }
    }
}

impl BoardGeometry {
    pub fn position_of(&self, sq: Square) -> Vec3 {
        Vec3::new(
            (sq.file as f32 - 3.5) * self.cell_size,
            (sq.rank as f32 - 3.5) * self.cell_size,
            self.piece_height,
        )
    }

    /// Center of a square given in algebraic form (`"e2"`).
    pub fn square_to_position(&self, square: &str) -> Result<Vec3, GameError> {
        Ok(self.position_of(square.parse()?))
    }

    /// Nearest square to a position, or `None` off the board. Height is ignored.
    pub fn position_to_square(&self, position: Vec3) -> Option<Square> {
        let file = (position.x / self.cell_size + 3.5).round();
        let rank = (position.y / self.cell_size + 3.5).round();
        if !(0.0..=7.0).contains(&file) || !(0.0..=7.0).contains(&rank) {
            return None;
        }
        Square::new(file as u8, rank as u8)
    }
}

#[cfg(test)]
#[path = "square_tests.rs"]
mod square_tests;
