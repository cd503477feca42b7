//! Iterative deepening driver and the timeout fallback

use isolation_core::{GameError, GameState, Move, SearchResult};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::error::SearchError;
use crate::FixedDepthSearch;

/// Runs a fixed-depth searcher at depth 1, 2, 3, ... until the deadline trips.
///
/// Deepening also ends once a completed depth reaches the end of every line,
/// so an unbounded clock still returns.
///
/// Only results of fully completed depths are kept. The timeout is caught
/// here and nowhere below, so a depth that was interrupted halfway never
/// contributes a move.
pub struct IterativeDeepening<S> {
    searcher: S,
    /// Stop after this many completed depths even if time remains
    max_depth: Option<u32>,
}

impl<S> IterativeDeepening<S> {
    pub fn new(searcher: S) -> Self {
        Self {
            searcher,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn choose_move<G>(&mut self, state: &G) -> Result<Move, GameError>
    where
        G: GameState,
        S: FixedDepthSearch<G>,
    {
        Ok(self.search(state)?.best_move)
    }

    /// Best move from the deepest completed depth.
    ///
    /// Falls back to a random legal move if not even depth 1 completed, and
    /// to `Move::NONE` if the side to act is stuck.
    pub fn search<G>(&mut self, state: &G) -> Result<SearchResult, GameError>
    where
        G: GameState,
        S: FixedDepthSearch<G>,
    {
        let mut best: Option<SearchResult> = None;
        let mut nodes = 0u64;
        let mut depth = 1u32;

        let stopped = loop {
            if self.max_depth.is_some_and(|max| depth > max) {
                break false;
            }
            match self.searcher.search(state, depth) {
                Ok(result) => {
                    nodes += result.nodes;
                    if result.best_move.is_none() {
                        // stuck at the root; deeper searches cannot change that
                        return Ok(SearchResult { nodes, ..result });
                    }
                    debug!(
                        "depth {} complete: {} scores {} ({} nodes)",
                        depth, result.best_move, result.score, result.nodes
                    );
                    best = Some(result);
                    if !self.searcher.reached_horizon() {
                        debug!("game tree exhausted at depth {}", depth);
                        break false;
                    }
                    depth += 1;
                }
                Err(SearchError::Timeout(_)) => {
                    nodes += self.searcher.nodes();
                    debug!("deadline reached during depth {}", depth);
                    break true;
                }
                Err(SearchError::Game(e)) => return Err(e),
            }
        };

        let result = match best {
            Some(result) => result,
            None => random_fallback(state),
        };
        Ok(SearchResult {
            nodes,
            stopped,
            ..result
        })
    }
}

/// Uniformly random legal move, used when no search depth completed.
pub fn random_fallback<G: GameState>(state: &G) -> SearchResult {
    let moves = state.legal_moves();
    match moves.choose(&mut thread_rng()) {
        Some(&mv) => {
            warn!("no search depth completed, playing random move {}", mv);
            SearchResult {
                best_move: mv,
                score: 0.0,
                depth: 0,
                nodes: 0,
                stopped: true,
            }
        }
        None => SearchResult {
            stopped: true,
            ..SearchResult::no_move()
        },
    }
}

#[cfg(test)]
#[path = "deepening_tests.rs"]
mod deepening_tests;
