use super::*;
use crate::eval::{improved_score, null_score, Heuristic};
use crate::minimax::MinimaxSearcher;
use isolation_core::{Board, SearchTimeout};
use std::cell::Cell;

fn board(width: usize, height: usize, moves: &[(i32, i32)]) -> Board {
    let mut board = Board::new(width, height).unwrap();
    for &mv in moves {
        board = board.forecast(Move::from(mv)).unwrap();
    }
    board
}

fn trap_position() -> Board {
    board(3, 3, &[(0, 0), (2, 2), (1, 2)])
}

#[test]
fn test_no_legal_moves_returns_sentinel_without_evaluating() {
    let stuck = board(3, 3, &[(1, 1), (0, 0)]);
    let calls = Cell::new(0);
    let eval = |b: &Board, p: Player| {
        calls.set(calls.get() + 1);
        null_score(b, p)
    };
    let clock = || f64::INFINITY;
    let mut searcher = AlphaBetaSearcher::new(&eval, Deadline::new(&clock, 0.0));

    assert_eq!(searcher.choose_move(&stuck, 3).unwrap(), Move::NONE);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_avoids_forced_loss() {
    let clock = || f64::INFINITY;
    let position = trap_position();

    let mut searcher = AlphaBetaSearcher::new(&null_score, Deadline::new(&clock, 0.0));
    assert_eq!(searcher.choose_move(&position, 1).unwrap(), Move::new(0, 1));
    assert_eq!(searcher.choose_move(&position, 2).unwrap(), Move::new(1, 0));
    assert_eq!(searcher.choose_move(&position, 3).unwrap(), Move::new(1, 0));
}

#[test]
fn test_all_moves_losing_still_returns_a_move() {
    // every P1 move from (0, 0) loses against best play
    let position = board(3, 3, &[(0, 0), (2, 2)]);
    let clock = || f64::INFINITY;
    let mut searcher = AlphaBetaSearcher::new(&null_score, Deadline::new(&clock, 0.0));

    let result = searcher.search(&position, 10).unwrap();
    assert_eq!(result.score, f64::NEG_INFINITY);
    assert_eq!(result.best_move, Move::new(1, 2));
}

#[test]
fn test_matches_minimax_on_midgame_position() {
    let clock = || f64::INFINITY;
    let position = board(5, 5, &[(2, 2), (0, 0), (0, 1), (1, 2)]);

    for heuristic in Heuristic::ALL {
        for depth in 1..=4 {
            let mut minimax = MinimaxSearcher::new(&heuristic, Deadline::new(&clock, 0.0));
            let mut alphabeta = AlphaBetaSearcher::new(&heuristic, Deadline::new(&clock, 0.0));
            let expected = minimax.search(&position, depth).unwrap();
            let actual = alphabeta.search(&position, depth).unwrap();

            assert_eq!(actual.best_move, expected.best_move, "{heuristic} depth {depth}");
            assert_eq!(actual.score, expected.score, "{heuristic} depth {depth}");
            assert!(actual.nodes <= expected.nodes);
        }
    }
}

#[test]
fn test_prunes_nodes() {
    let clock = || f64::INFINITY;
    let position = board(5, 5, &[(2, 2), (0, 0)]);

    let mut minimax = MinimaxSearcher::new(&improved_score, Deadline::new(&clock, 0.0));
    let mut alphabeta = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 0.0));
    let full = minimax.search(&position, 4).unwrap();
    let pruned = alphabeta.search(&position, 4).unwrap();

    assert_eq!(full.best_move, pruned.best_move);
    assert!(pruned.nodes < full.nodes);
}

#[test]
fn test_narrow_window_keeps_first_move() {
    // with beta at -inf the first root child already fails high
    let clock = || f64::INFINITY;
    let position = board(5, 5, &[(2, 2), (0, 0)]);
    let mut searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 0.0));

    let mv = searcher
        .choose_move_with_window(&position, 3, f64::NEG_INFINITY, f64::NEG_INFINITY)
        .unwrap();
    assert_eq!(mv, position.legal_moves()[0]);
}

#[test]
fn test_expired_clock_aborts_immediately() {
    let clock = || -1.0;
    let mut searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 10.0));

    let err = searcher.choose_move(&Board::default(), 5).unwrap_err();
    assert_eq!(err, SearchError::Timeout(SearchTimeout));
    assert_eq!(searcher.nodes, 0);
}

#[test]
fn test_every_layer_checks_the_clock() {
    let checks = Cell::new(0u64);
    let clock = || {
        checks.set(checks.get() + 1);
        f64::INFINITY
    };
    let mut searcher = AlphaBetaSearcher::new(&improved_score, Deadline::new(&clock, 10.0));
    let result = searcher.search(&board(5, 5, &[(2, 2), (0, 0)]), 3).unwrap();

    assert_eq!(checks.get(), result.nodes);
}
