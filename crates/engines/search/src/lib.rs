//! Isolation Search Engine
//!
//! Time-bounded game-tree search for the isolation game.
//!
//! - [`MinimaxSearcher`]: exhaustive fixed-depth minimax
//! - [`AlphaBetaSearcher`]: the same search with alpha-beta pruning
//! - [`IterativeDeepening`]: reruns a fixed-depth searcher at increasing
//!   depth until the turn's deadline, keeping the last completed result
//!
//! Every recursive call checks the [`Deadline`] on entry. When it trips, the
//! search unwinds with [`SearchError::Timeout`] and only the top-level driver
//! decides what to play instead.

mod alphabeta;
mod deepening;
mod error;
mod eval;
mod minimax;

use isolation_core::{Agent, Board, Clock, Deadline, GameError, GameState, Move, SearchResult};
use log::error;
use serde::{Deserialize, Serialize};

pub use alphabeta::AlphaBetaSearcher;
pub use deepening::{random_fallback, IterativeDeepening};
pub use error::SearchError;
pub use eval::*;
pub use minimax::MinimaxSearcher;

/// One fixed-depth search, as driven by [`IterativeDeepening`].
pub trait FixedDepthSearch<G: GameState> {
    fn search(&mut self, state: &G, depth: u32) -> Result<SearchResult, SearchError>;

    /// Nodes visited by the latest (possibly interrupted) search
    fn nodes(&self) -> u64;

    /// Whether the latest completed search stopped any line at the depth
    /// limit. When it did not, a deeper search visits the same tree.
    fn reached_horizon(&self) -> bool;
}

/// How a move is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth for fixed-depth mode; ignored with iterative deepening
    pub search_depth: u32,
    pub use_alpha_beta: bool,
    pub use_iterative_deepening: bool,
    pub heuristic: Heuristic,
    /// Abort once fewer than this many milliseconds are left
    pub timer_threshold_ms: f64,
    /// Upper bound on iterative deepening (None = until the deadline)
    pub max_depth: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            use_alpha_beta: true,
            use_iterative_deepening: true,
            heuristic: Heuristic::default(),
            timer_threshold_ms: 10.0,
            max_depth: None,
        }
    }
}

impl SearchConfig {
    /// Fixed-depth minimax, no pruning.
    pub fn minimax(depth: u32) -> Self {
        Self {
            search_depth: depth,
            use_alpha_beta: false,
            use_iterative_deepening: false,
            ..Default::default()
        }
    }

    /// Fixed-depth alpha-beta.
    pub fn alpha_beta(depth: u32) -> Self {
        Self {
            search_depth: depth,
            use_iterative_deepening: false,
            ..Default::default()
        }
    }

    /// Iterative deepening alpha-beta until the deadline.
    pub fn iterative() -> Self {
        Self::default()
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Chooses a move for the side to act using `config.heuristic`.
///
/// Returns `Move::NONE` if there is no legal move. Running out of time is not
/// an error: the best completed result, or a random legal move, is returned.
pub fn select_move<G>(
    state: &G,
    clock: &dyn Clock,
    config: &SearchConfig,
) -> Result<Move, GameError>
where
    G: GameState,
    Heuristic: Evaluator<G>,
{
    Ok(search(state, clock, config, &config.heuristic)?.best_move)
}

/// [`select_move`] with any evaluation strategy in place of the configured one.
pub fn select_move_with<G, E>(
    state: &G,
    clock: &dyn Clock,
    config: &SearchConfig,
    evaluator: &E,
) -> Result<Move, GameError>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    Ok(search(state, clock, config, evaluator)?.best_move)
}

/// Full search report behind [`select_move_with`].
pub fn search<G, E>(
    state: &G,
    clock: &dyn Clock,
    config: &SearchConfig,
    evaluator: &E,
) -> Result<SearchResult, GameError>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    let deadline = Deadline::new(clock, config.timer_threshold_ms);

    if config.use_iterative_deepening {
        return if config.use_alpha_beta {
            IterativeDeepening::new(AlphaBetaSearcher::new(evaluator, deadline))
                .with_max_depth(config.max_depth)
                .search(state)
        } else {
            IterativeDeepening::new(MinimaxSearcher::new(evaluator, deadline))
                .with_max_depth(config.max_depth)
                .search(state)
        };
    }

    let outcome = if config.use_alpha_beta {
        AlphaBetaSearcher::new(evaluator, deadline).search(state, config.search_depth)
    } else {
        MinimaxSearcher::new(evaluator, deadline).search(state, config.search_depth)
    };
    match outcome {
        Ok(result) => Ok(result),
        Err(SearchError::Timeout(_)) => Ok(random_fallback(state)),
        Err(SearchError::Game(e)) => Err(e),
    }
}

/// Search-based isolation player.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    name: String,
    config: SearchConfig,
    /// Last search report, for logging and tests
    last: Option<SearchResult>,
}

impl SearchAgent {
    pub fn new(config: SearchConfig) -> Self {
        let name = Self::default_name(&config);
        Self::with_name(name, config)
    }

    pub fn with_name(name: impl Into<String>, config: SearchConfig) -> Self {
        Self {
            name: name.into(),
            config,
            last: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last.as_ref()
    }

    fn default_name(config: &SearchConfig) -> String {
        let algorithm = if config.use_alpha_beta {
            "AlphaBeta"
        } else {
            "Minimax"
        };
        if config.use_iterative_deepening {
            format!("{algorithm} ID ({})", config.heuristic)
        } else {
            format!("{algorithm} d{} ({})", config.search_depth, config.heuristic)
        }
    }
}

impl Default for SearchAgent {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Agent for SearchAgent {
    fn get_move(&mut self, board: &Board, clock: &dyn Clock) -> Move {
        match search(board, clock, &self.config, &self.config.heuristic) {
            Ok(result) => {
                self.last = Some(result);
                result.best_move
            }
            Err(e) => {
                error!("{}: search failed: {}", self.name, e);
                self.last = None;
                Move::NONE
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
