use super::*;
use crate::alphabeta::AlphaBetaSearcher;
use crate::eval::{improved_score, null_score};
use crate::minimax::MinimaxSearcher;
use isolation_core::{Board, Clock, Deadline, Player};
use std::cell::Cell;

fn board(width: usize, height: usize, moves: &[(i32, i32)]) -> Board {
    let mut board = Board::new(width, height).unwrap();
    for &mv in moves {
        board = board.forecast(Move::from(mv)).unwrap();
    }
    board
}

/// Clock that allows exactly `budget` deadline checks.
struct CountingClock {
    budget: u64,
    calls: Cell<u64>,
}

impl CountingClock {
    fn new(budget: u64) -> Self {
        Self {
            budget,
            calls: Cell::new(0),
        }
    }
}

impl Clock for CountingClock {
    fn remaining_ms(&self) -> f64 {
        self.calls.set(self.calls.get() + 1);
        if self.calls.get() > self.budget {
            0.0
        } else {
            1000.0
        }
    }
}

fn nodes_at(position: &Board, depth: u32) -> u64 {
    let clock = || f64::INFINITY;
    let mut searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 1.0));
    searcher.search(position, depth).unwrap().nodes
}

#[test]
fn test_max_depth_matches_fixed_depth_search() {
    let position = board(5, 5, &[(2, 2), (0, 0)]);
    let clock = || f64::INFINITY;

    for max_depth in 1..=4 {
        let mut fixed = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 1.0));
        let expected = fixed.search(&position, max_depth).unwrap();

        let searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 1.0));
        let result = IterativeDeepening::new(searcher)
            .with_max_depth(Some(max_depth))
            .search(&position)
            .unwrap();

        assert_eq!(result.best_move, expected.best_move);
        assert_eq!(result.score, expected.score);
        assert_eq!(result.depth, max_depth);
        assert!(!result.stopped);
    }
}

#[test]
fn test_keeps_last_completed_depth_on_timeout() {
    let position = board(5, 5, &[(2, 2), (0, 0)]);
    let completed = nodes_at(&position, 1) + nodes_at(&position, 2);

    let clock = || f64::INFINITY;
    let mut fixed = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 1.0));
    let depth_two = fixed.search(&position, 2).unwrap();

    // trips on the first check of depth 3, then halfway through it
    for extra in [0, 5] {
        let clock = CountingClock::new(completed + extra);
        let searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 1.0));
        let result = IterativeDeepening::new(searcher).search(&position).unwrap();

        assert!(result.stopped);
        assert_eq!(result.depth, 2);
        assert_eq!(result.best_move, depth_two.best_move);
        assert_eq!(result.score, depth_two.score);
        assert_eq!(result.nodes, completed + extra);
    }
}

#[test]
fn test_deeper_completed_search_finds_safe_move() {
    // P2 to move: (0, 1) loses in two plies, (1, 0) does not
    let position = board(3, 3, &[(0, 0), (2, 2), (1, 2)]);
    let clock = || f64::INFINITY;

    let shallow = IterativeDeepening::new(AlphaBetaSearcher::new(
        &null_score,
        Deadline::new(&clock, 1.0),
    ))
    .with_max_depth(Some(1))
    .choose_move(&position)
    .unwrap();
    let deep = IterativeDeepening::new(AlphaBetaSearcher::new(
        &null_score,
        Deadline::new(&clock, 1.0),
    ))
    .with_max_depth(Some(3))
    .choose_move(&position)
    .unwrap();

    assert_eq!(shallow, Move::new(0, 1));
    assert_eq!(deep, Move::new(1, 0));
}

#[test]
fn test_expired_clock_falls_back_to_random_legal_move() {
    let position = board(5, 5, &[(2, 2), (0, 0)]);
    let clock = || 0.0;
    let searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 10.0));

    let result = IterativeDeepening::new(searcher).search(&position).unwrap();

    assert!(result.stopped);
    assert_eq!(result.depth, 0);
    assert!(position.legal_moves().contains(&result.best_move));
}

#[test]
fn test_stuck_root_returns_sentinel() {
    let stuck = board(3, 3, &[(1, 1), (0, 0)]);
    assert_eq!(stuck.active_player(), Player::One);

    let live = || f64::INFINITY;
    let searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&live, 1.0));
    assert_eq!(
        IterativeDeepening::new(searcher).choose_move(&stuck).unwrap(),
        Move::NONE
    );

    let expired = || 0.0;
    let searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&expired, 1.0));
    assert_eq!(
        IterativeDeepening::new(searcher).choose_move(&stuck).unwrap(),
        Move::NONE
    );
}

#[test]
fn test_random_fallback_without_moves() {
    let stuck = board(3, 3, &[(1, 1), (0, 0)]);
    let result = random_fallback(&stuck);
    assert_eq!(result.best_move, Move::NONE);
    assert!(result.stopped);
}

#[test]
fn test_stops_once_game_tree_is_exhausted() {
    let position = board(3, 3, &[(0, 0), (2, 2)]);
    let clock = || f64::INFINITY;

    let mut exhaustive = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 1.0));
    let expected = exhaustive.search(&position, 7).unwrap();
    assert!(!FixedDepthSearch::<Board>::reached_horizon(&exhaustive));

    let searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 1.0));
    let result = IterativeDeepening::new(searcher).search(&position).unwrap();

    assert!(!result.stopped);
    assert!(result.depth <= 7);
    assert_eq!(result.best_move, expected.best_move);
    assert_eq!(result.score, expected.score);
}

#[test]
fn test_shallow_search_reports_horizon() {
    let position = board(5, 5, &[(2, 2), (0, 0)]);
    let clock = || f64::INFINITY;
    let mut searcher = MinimaxSearcher::new(&null_score, Deadline::new(&clock, 1.0));

    searcher.search(&position, 2).unwrap();
    assert!(FixedDepthSearch::<Board>::reached_horizon(&searcher));
}
