//! Opening placement of the 32 pieces.

use std::fmt;

use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "WHITE"),
            Color::Black => write!(f, "BLACK"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "PAWN",
            PieceKind::Knight => "KNIGHT",
            PieceKind::Bishop => "BISHOP",
            PieceKind::Rook => "ROOK",
            PieceKind::Queen => "QUEEN",
            PieceKind::King => "KING",
        };
        write!(f, "{name}")
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Standard starting position as `(identifier, square)` pairs.
///
/// Identifiers look like `WHITE_PAWN_5`, `BLACK_KNIGHT_2` or `WHITE_KING`;
/// paired pieces are numbered from the a-file side.
pub fn standard_layout() -> Vec<(String, Square)> {
    let mut layout = Vec::with_capacity(32);
    for (color, back, front) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
        let mut seen = [0u8; 6];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let id = match kind {
                PieceKind::Queen | PieceKind::King => format!("{color}_{kind}"),
                _ => {
                    seen[kind as usize] += 1;
                    format!("{color}_{kind}_{}", seen[kind as usize])
                }
            };
            layout.extend(Square::new(file as u8, back).map(|sq| (id, sq)));
        }
        for file in 0..8u8 {
            let id = format!("{color}_{}_{}", PieceKind::Pawn, file + 1);
            layout.extend(Square::new(file, front).map(|sq| (id, sq)));
        }
    }
    layout
}
