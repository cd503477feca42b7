use thiserror::Error;

use crate::types::{Move, Player};

/// Errors raised by the board itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move {mv} for {player}")]
    IllegalMove { mv: Move, player: Player },
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
