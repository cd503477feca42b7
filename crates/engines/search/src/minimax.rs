//! Depth-limited minimax

use isolation_core::{Deadline, GameState, Move, Player, SearchResult};

use crate::error::SearchError;
use crate::eval::Evaluator;
use crate::FixedDepthSearch;

/// Exhaustive fixed-depth minimax search.
///
/// Leaves are scored from the perspective of the player to act at the root.
/// Every layer checks the deadline before doing anything else.
pub struct MinimaxSearcher<'a, E: ?Sized> {
    evaluator: &'a E,
    deadline: Deadline<'a>,
    root_player: Player,
    /// Node counter for statistics
    nodes: u64,
    /// Set when some line was cut off by the depth limit
    horizon_hit: bool,
}

impl<'a, E: ?Sized> MinimaxSearcher<'a, E> {
    pub fn new(evaluator: &'a E, deadline: Deadline<'a>) -> Self {
        Self {
            evaluator,
            deadline,
            root_player: Player::One,
            nodes: 0,
            horizon_hit: false,
        }
    }

    /// Best move at `depth`, or `Move::NONE` if the side to act is stuck.
    pub fn choose_move<G>(&mut self, state: &G, depth: u32) -> Result<Move, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        Ok(self.search(state, depth)?.best_move)
    }

    /// Like [`MinimaxSearcher::choose_move`], also reporting the backed-up
    /// score and node count.
    ///
    /// Ties keep the first move in enumeration order. A depth of 0 is treated
    /// as 1.
    pub fn search<G>(&mut self, state: &G, depth: u32) -> Result<SearchResult, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.nodes = 0;
        self.horizon_hit = false;
        self.deadline.check()?;
        self.nodes += 1;
        self.root_player = state.active_player();

        let mut best: Option<(Move, f64)> = None;
        for mv in state.legal_moves() {
            let child = state.forecast(mv)?;
            let value = self.min_value(&child, depth.saturating_sub(1))?;
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
        }

        let (best_move, score) = best.unwrap_or((Move::NONE, f64::NEG_INFINITY));
        Ok(SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            stopped: false,
        })
    }

    fn min_value<G>(&mut self, state: &G, depth: u32) -> Result<f64, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.deadline.check()?;
        self.nodes += 1;

        let moves = state.legal_moves();
        if moves.is_empty() || depth == 0 {
            self.horizon_hit |= !moves.is_empty();
            return Ok(self.evaluator.score(state, self.root_player));
        }

        let mut value = f64::INFINITY;
        for mv in moves {
            let child = state.forecast(mv)?;
            value = value.min(self.max_value(&child, depth - 1)?);
        }
        Ok(value)
    }

    fn max_value<G>(&mut self, state: &G, depth: u32) -> Result<f64, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.deadline.check()?;
        self.nodes += 1;

        let moves = state.legal_moves();
        if moves.is_empty() || depth == 0 {
            self.horizon_hit |= !moves.is_empty();
            return Ok(self.evaluator.score(state, self.root_player));
        }

        let mut value = f64::NEG_INFINITY;
        for mv in moves {
            let child = state.forecast(mv)?;
            value = value.max(self.min_value(&child, depth - 1)?);
        }
        Ok(value)
    }
}

impl<G, E> FixedDepthSearch<G> for MinimaxSearcher<'_, E>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    fn search(&mut self, state: &G, depth: u32) -> Result<SearchResult, SearchError> {
        MinimaxSearcher::search(self, state, depth)
    }

    fn nodes(&self) -> u64 {
        self.nodes
    }

    fn reached_horizon(&self) -> bool {
        self.horizon_hit
    }
}

#[cfg(test)]
#[path = "minimax_tests.rs"]
mod minimax_tests;
