//! Error types for game state operations

/// Errors that can occur when placing or moving pieces
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Not `[a-h][1-8]`
    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    /// Move text is not two distinct valid squares
    #[error("invalid move `{0}`")]
    InvalidMove(String),

    #[error("no piece at {0}")]
    NoPieceAtSquare(String),

    /// The piece on the from-square is still animating its previous move
    #[error("piece {0} is still moving")]
    PieceInMotion(String),

    #[error("square {0} is already occupied")]
    SquareOccupied(String),

    #[error("piece {0} already exists")]
    DuplicatePiece(String),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
