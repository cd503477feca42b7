//! Baseline Isolation Players
//!
//! Two players that do no tree search:
//! - [`RandomAgent`] picks uniformly among the legal moves
//! - [`GreedyAgent`] picks the move whose resulting position scores best one
//!   ply ahead
//!
//! Useful for testing the game loop and as opponents any real search should
//! beat.

use isolation_core::{Agent, Board, Clock, GameError, GameState, Move};
use log::error;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use search_engine::Heuristic;


/// Plays a uniformly random legal move.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of choices.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn get_move(&mut self, board: &Board, _clock: &dyn Clock) -> Move {
        board
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::NONE)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Plays the move with the best heuristic score one ply ahead.
///
/// Ties go to the first move in enumeration order.
#[derive(Debug, Clone)]
pub struct GreedyAgent {
    heuristic: Heuristic,
    name: String,
}

impl GreedyAgent {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            name: format!("Greedy ({heuristic})"),
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new(Heuristic::OpenMove)
    }
}

impl GreedyAgent {
    /// Highest-scoring move one ply ahead, or `Move::NONE` when stuck.
    pub fn best_move(&self, board: &Board) -> Result<Move, GameError> {
        let me = board.active_player();
        let mut best: Option<(Move, f64)> = None;
        for mv in board.legal_moves() {
            let score = self.heuristic.evaluate(&board.forecast(mv)?, me);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }
        Ok(best.map_or(Move::NONE, |(mv, _)| mv))
    }
}

impl Agent for GreedyAgent {
    fn get_move(&mut self, board: &Board, _clock: &dyn Clock) -> Move {
        self.best_move(board).unwrap_or_else(|e| {
            error!("{}: cannot score moves: {}", self.name, e);
            Move::NONE
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
