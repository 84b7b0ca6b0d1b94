//! Game state for a rendered chess board.
//!
//! Pieces are tracked by identifier with a continuous 3-D position; moves are
//! checked for shape only (two valid, distinct squares) and turned into
//! animations that a renderer samples every frame. Chess legality is not
//! judged here.

pub mod coordinator;
pub mod error;
pub mod layout;
pub mod movement;
pub mod registry;
pub mod square;

pub use coordinator::*;
pub use error::{GameError, GameResult};
pub use layout::*;
pub use movement::*;
pub use registry::*;
pub use square::*;

pub use glam::Vec3;
