pub mod board;
pub mod error;
pub mod time_control;
pub mod types;

pub use board::*;
pub use error::GameError;
pub use time_control::*;
pub use types::*;

// =============================================================================
// Game state contract consumed by the searchers
// =============================================================================

/// Forecast-functional view of a two-player game position.
///
/// Implementations never mutate in place: [`GameState::forecast`] returns the
/// successor and leaves `self` valid, so a search can reuse one state for
/// every sibling branch.
pub trait GameState: Clone {
    /// Side to act.
    fn active_player(&self) -> Player;

    /// Legal moves for the side to act, empty if it is stuck.
    fn legal_moves(&self) -> Vec<Move>;

    /// Successor state after the side to act plays `mv`.
    ///
    /// Fails with [`GameError::IllegalMove`] if `mv` is not in
    /// [`GameState::legal_moves`].
    fn forecast(&self, mv: Move) -> Result<Self, GameError>;

    fn is_winner(&self, player: Player) -> bool;

    fn is_loser(&self, player: Player) -> bool;
}

// =============================================================================
// Agent trait — implemented by every player (search, greedy, random, ...)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// The best move found (`Move::NONE` if no legal moves)
    pub best_move: Move,
    /// Backed-up score of `best_move` from the searching player's perspective
    pub score: f64,
    /// Deepest fully completed search depth
    pub depth: u32,
    /// Number of nodes visited
    pub nodes: u64,
    /// Whether the search ended on the deadline
    pub stopped: bool,
}

impl SearchResult {
    pub fn no_move() -> Self {
        Self {
            best_move: Move::NONE,
            score: f64::NEG_INFINITY,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// A player that picks moves on an isolation board.
///
/// The board is the caller's copy; agents must return before `clock` reports
/// a negative remaining time or they forfeit.
pub trait Agent: Send {
    fn get_move(&mut self, board: &Board, clock: &dyn Clock) -> Move;

    /// Name shown in game records
    fn name(&self) -> &str;
}
