use super::*;
use baseline_engine::{GreedyAgent, RandomAgent};
use isolation_core::Move;
use search_engine::{Heuristic, SearchAgent, SearchConfig};
use std::thread;

/// Always answers with a cell the opponent already holds.
struct Cheater;

impl Agent for Cheater {
    fn get_move(&mut self, board: &Board, _clock: &dyn Clock) -> Move {
        let me = board.active_player();
        board
            .player_location(me.opponent())
            .unwrap_or(Move::new(-5, -5))
    }

    fn name(&self) -> &str {
        "Cheater"
    }
}

/// Sleeps past the limit before answering, optionally with no move at all.
struct Sleeper {
    delay: Duration,
    resign: bool,
}

impl Agent for Sleeper {
    fn get_move(&mut self, board: &Board, _clock: &dyn Clock) -> Move {
        thread::sleep(self.delay);
        if self.resign {
            Move::NONE
        } else {
            board.legal_moves()[0]
        }
    }

    fn name(&self) -> &str {
        "Sleeper"
    }
}

#[test]
fn test_random_self_play_ends_without_moves() {
    let mut one = RandomAgent::seeded(1);
    let mut two = RandomAgent::seeded(2);
    let runner = GameRunner::new(Duration::from_millis(100));

    let record = runner.play(Board::new(5, 5).unwrap(), &mut one, &mut two);

    assert_eq!(record.termination, Termination::NoLegalMoves);
    assert_eq!(record.final_answer, None);
    assert!(record.history.len() >= 2);
    for (ply, entry) in record.history.iter().enumerate() {
        let expected = if ply % 2 == 0 { Player::One } else { Player::Two };
        assert_eq!(entry.player, expected);
    }

    // the side to act after the last ply is the one that got stuck
    let final_board = replay(&record).unwrap();
    assert_eq!(final_board.to_string(), record.final_board);
    assert!(final_board.legal_moves().is_empty());
    assert_eq!(record.loser(), final_board.active_player());
}

#[test]
fn test_illegal_answer_forfeits() {
    let mut one = RandomAgent::seeded(5);
    let mut two = Cheater;
    let runner = GameRunner::default();

    let record = runner.play(Board::default(), &mut one, &mut two);

    assert_eq!(record.winner, Player::One);
    assert_eq!(record.termination, Termination::IllegalMove);
    assert_eq!(record.history.len(), 1);
    assert_eq!(record.final_answer, Some(record.history[0].mv));
}

#[test]
fn test_late_answer_forfeits() {
    let runner = GameRunner::new(Duration::from_millis(10));

    for resign in [false, true] {
        let mut one = Sleeper {
            delay: Duration::from_millis(40),
            resign,
        };
        let mut two = RandomAgent::seeded(5);
        let record = runner.play(Board::default(), &mut one, &mut two);

        assert_eq!(record.winner, Player::Two);
        assert_eq!(record.termination, Termination::Timeout);
        assert!(record.history.is_empty());
        // a late "no move" is recorded as no answer, like an early one
        let expected = (!resign).then(|| Board::default().legal_moves()[0]);
        assert_eq!(record.final_answer, expected);
    }
}

#[test]
fn test_search_agent_never_times_out() {
    let mut one = SearchAgent::new(SearchConfig::iterative().with_heuristic(Heuristic::Improved));
    let mut two = GreedyAgent::default();
    let runner = GameRunner::new(Duration::from_millis(60));

    let record = runner.play(Board::new(5, 5).unwrap(), &mut one, &mut two);

    assert_eq!(record.termination, Termination::NoLegalMoves);
    assert!(record
        .history
        .iter()
        .all(|ply| ply.elapsed_ms < runner.time_limit().as_secs_f64() * 1000.0));
}

#[test]
fn test_play_configured_uses_board_size() {
    let config = ArenaConfig::from_toml(
        r#"
        time_limit_ms = 50

        [board]
        width = 4
        height = 4

        [player_one]
        kind = "random"
        seed = 3

        [player_two]
        kind = "greedy"
        "#,
    )
    .unwrap();

    let record = play_configured(&config).unwrap();
    assert_eq!((record.width, record.height), (4, 4));
    assert_eq!(record.time_limit_ms, 50);
    assert_eq!(record.player_one, "Random");
    assert_eq!(record.player_two, "Greedy (weighted_mobility)");
}

#[test]
fn test_record_round_trips_through_json() {
    let mut one = RandomAgent::seeded(11);
    let mut two = RandomAgent::seeded(12);
    let record = GameRunner::default().play(Board::new(4, 4).unwrap(), &mut one, &mut two);

    let path = std::env::temp_dir().join(format!("isolation-record-{}.json", std::process::id()));
    record.save(&path).unwrap();
    let loaded = GameRecord::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.winner, record.winner);
    assert_eq!(loaded.termination, record.termination);
    assert_eq!(loaded.final_board, record.final_board);
    let moves = |r: &GameRecord| r.history.iter().map(|p| (p.player, p.mv)).collect::<Vec<_>>();
    assert_eq!(moves(&loaded), moves(&record));
    let report = loaded.generate_report();
    assert!(report.contains("Random vs Random"));
    assert!(report.contains("lost by no legal moves"));
}
