//! Sparse piece registry keyed by piece identifier.

use glam::Vec3;
use std::collections::BTreeMap;

use crate::error::GameError;

/// One physical piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceEntry {
    /// Current position, mid-animation positions included
    pub position: Vec3,
    /// Captured pieces stay registered but are no longer rendered or matched
    pub captured: bool,
}

/// Piece identifier to position map.
///
/// Ordered by identifier, so "first piece within tolerance" is deterministic.
#[derive(Debug, Clone, Default)]
pub struct PieceRegistry {
    pieces: BTreeMap<String, PieceEntry>,
}

impl PieceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str, position: Vec3) -> Result<(), GameError> {
        if self.pieces.contains_key(id) {
            return Err(GameError::DuplicatePiece(id.to_string()));
        }
        self.pieces.insert(
            id.to_string(),
            PieceEntry {
                position,
                captured: false,
            },
        );
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PieceEntry> {
        self.pieces.get(id)
    }

    pub fn position(&self, id: &str) -> Option<Vec3> {
        self.pieces.get(id).map(|p| p.position)
    }

    pub(crate) fn set_position(&mut self, id: &str, position: Vec3) {
        if let Some(entry) = self.pieces.get_mut(id) {
            entry.position = position;
        }
    }

    pub(crate) fn mark_captured(&mut self, id: &str) {
        if let Some(entry) = self.pieces.get_mut(id) {
            entry.captured = true;
        }
    }

    /// Uncaptured pieces whose position lies within `tolerance` of `target`.
    pub fn pieces_near(&self, target: Vec3, tolerance: f32) -> impl Iterator<Item = &str> {
        self.active()
            .filter(move |(_, pos)| pos.distance(target) < tolerance)
            .map(|(id, _)| id)
    }

    /// Uncaptured pieces with their positions.
    pub fn active(&self) -> impl Iterator<Item = (&str, Vec3)> {
        self.pieces
            .iter()
            .filter(|(_, entry)| !entry.captured)
            .map(|(id, entry)| (id.as_str(), entry.position))
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
