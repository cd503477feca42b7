//! Depth-limited minimax with alpha-beta pruning

use isolation_core::{Deadline, GameState, Move, Player, SearchResult};

use crate::error::SearchError;
use crate::eval::Evaluator;
use crate::FixedDepthSearch;

/// Fixed-depth search with alpha-beta pruning.
///
/// Explores the same tree as [`crate::MinimaxSearcher`] and returns the same
/// move; pruning only skips subtrees that cannot change the root decision.
pub struct AlphaBetaSearcher<'a, E: ?Sized> {
    evaluator: &'a E,
    deadline: Deadline<'a>,
    root_player: Player,
    /// Node counter for statistics
    nodes: u64,
    /// Set when some line was cut off by the depth limit
    horizon_hit: bool,
}

impl<'a, E: ?Sized> AlphaBetaSearcher<'a, E> {
    pub fn new(evaluator: &'a E, deadline: Deadline<'a>) -> Self {
        Self {
            evaluator,
            deadline,
            root_player: Player::One,
            nodes: 0,
            horizon_hit: false,
        }
    }

    /// Best move at `depth` with a full `(-inf, +inf)` window.
    pub fn choose_move<G>(&mut self, state: &G, depth: u32) -> Result<Move, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.choose_move_with_window(state, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn choose_move_with_window<G>(
        &mut self,
        state: &G,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> Result<Move, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        Ok(self.search_with_window(state, depth, alpha, beta)?.best_move)
    }

    pub fn search<G>(&mut self, state: &G, depth: u32) -> Result<SearchResult, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.search_with_window(state, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Root of the search.
    ///
    /// The first move is always taken; later moves replace it only with a
    /// strictly greater value. Alpha is raised after every root child so
    /// later siblings are searched with a narrower window.
    pub fn search_with_window<G>(
        &mut self,
        state: &G,
        depth: u32,
        mut alpha: f64,
        beta: f64,
    ) -> Result<SearchResult, SearchError>
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
            let value = self.min_value(&child, depth.saturating_sub(1), alpha, beta)?;
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
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

    fn min_value<G>(
        &mut self,
        state: &G,
        depth: u32,
        alpha: f64,
        mut beta: f64,
    ) -> Result<f64, SearchError>
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
            value = value.min(self.max_value(&child, depth - 1, alpha, beta)?);
            if value <= alpha {
                return Ok(value); // alpha cutoff
            }
            beta = beta.min(value);
        }
        Ok(value)
    }

    fn max_value<G>(
        &mut self,
        state: &G,
        depth: u32,
        mut alpha: f64,
        beta: f64,
    ) -> Result<f64, SearchError>
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
            value = value.max(self.min_value(&child, depth - 1, alpha, beta)?);
            if value >= beta {
                return Ok(value); // beta cutoff
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }
}

impl<G, E> FixedDepthSearch<G> for AlphaBetaSearcher<'_, E>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    fn search(&mut self, state: &G, depth: u32) -> Result<SearchResult, SearchError> {
        AlphaBetaSearcher::search(self, state, depth)
    }

    fn nodes(&self) -> u64 {
        self.nodes
    }

    fn reached_horizon(&self) -> bool {
        self.horizon_hit
    }
}

#[cfg(test)]
#[path = "alphabeta_tests.rs"]
mod alphabeta_tests;
