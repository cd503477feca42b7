//! Plays a single game between two agents

use std::time::Duration;

use isolation_core::{Agent, Board, Clock, GameState, Player, TimeControl};
use log::{debug, info};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::results::{GameRecord, PlyRecord, Termination};

/// Referee for one game.
///
/// Each turn the active agent gets a copy of the board and a fresh clock.
/// Answering late or with a move outside the legal set loses on the spot.
#[derive(Debug, Clone)]
pub struct GameRunner {
    time_limit: Duration,
}

impl Default for GameRunner {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

impl GameRunner {
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Plays `board` out to the end; `player_one` moves first.
    pub fn play<'a>(
        &self,
        mut board: Board,
        player_one: &'a mut dyn Agent,
        player_two: &'a mut dyn Agent,
    ) -> GameRecord {
        let mut history = Vec::new();

        let (winner, termination, final_answer) = loop {
            let active = board.active_player();
            let agent = match active {
                Player::One => &mut *player_one,
                Player::Two => &mut *player_two,
            };
            let legal = board.legal_moves();

            let clock = TimeControl::new(Some(self.time_limit));
            let mv = agent.get_move(&board.clone(), &clock);
            let remaining = clock.remaining_ms();
            let elapsed_ms = clock.elapsed().as_secs_f64() * 1000.0;
            let answer = Some(mv).filter(|m| !m.is_none());

            if remaining < 0.0 {
                break (active.opponent(), Termination::Timeout, answer);
            }
            if !legal.contains(&mv) {
                let termination = if legal.is_empty() {
                    Termination::NoLegalMoves
                } else {
                    Termination::IllegalMove
                };
                break (active.opponent(), termination, answer);
            }
            if board.apply_move(mv).is_err() {
                break (active.opponent(), Termination::IllegalMove, Some(mv));
            }

            debug!("{} ({}) plays {} in {:.1} ms", agent.name(), active, mv, elapsed_ms);
            history.push(PlyRecord {
                player: active,
                mv,
                elapsed_ms,
            });
        };

        let record = GameRecord {
            player_one: player_one.name().to_string(),
            player_two: player_two.name().to_string(),
            width: board.width(),
            height: board.height(),
            time_limit_ms: self.time_limit.as_millis() as u64,
            winner,
            termination,
            final_answer,
            history,
            final_board: board.to_string(),
        };
        info!(
            "{} wins after {} plies: {} lost by {}",
            record.winner_name(),
            record.history.len(),
            record.name_of(record.loser()),
            termination
        );
        record
    }
}

/// Builds both agents and the board from `config` and plays one game.
pub fn play_configured(config: &ArenaConfig) -> Result<GameRecord, ArenaError> {
    let board = config.board.build()?;
    let mut player_one = config.player_one.build();
    let mut player_two = config.player_two.build();
    let runner = GameRunner::new(Duration::from_millis(config.time_limit_ms));
    Ok(runner.play(board, player_one.as_mut(), player_two.as_mut()))
}

/// Replays a record's history on a fresh board of the same size.
pub fn replay(record: &GameRecord) -> Result<Board, ArenaError> {
    let mut board = Board::new(record.width, record.height)?;
    for ply in &record.history {
        board = board.forecast(ply.mv)?;
    }
    Ok(board)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
