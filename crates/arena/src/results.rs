//! Game records and reporting

use std::fmt;
use std::path::Path;

use isolation_core::{Move, Player};
use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The side to act had no legal move
    NoLegalMoves,
    /// The side to act answered after its time ran out
    Timeout,
    /// The side to act answered with a move outside the legal set
    IllegalMove,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::NoLegalMoves => write!(f, "no legal moves"),
            Termination::Timeout => write!(f, "timeout"),
            Termination::IllegalMove => write!(f, "illegal move"),
        }
    }
}

/// One ply of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlyRecord {
    pub player: Player,
    #[serde(rename = "move")]
    pub mv: Move,
    /// Milliseconds the agent spent choosing
    pub elapsed_ms: f64,
}

/// Complete record of a single game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player_one: String,
    pub player_two: String,
    pub width: usize,
    pub height: usize,
    pub time_limit_ms: u64,
    pub winner: Player,
    pub termination: Termination,
    /// Move the loser returned when the game ended, if any
    pub final_answer: Option<Move>,
    pub history: Vec<PlyRecord>,
    /// Rendering of the final position
    pub final_board: String,
}

impl GameRecord {
    pub fn loser(&self) -> Player {
        self.winner.opponent()
    }

    pub fn name_of(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two,
        }
    }

    pub fn winner_name(&self) -> &str {
        self.name_of(self.winner)
    }

    /// Save record to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ArenaError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ArenaError::io(path, e))
    }

    /// Load record from JSON file
    pub fn load(path: &Path) -> Result<Self, ArenaError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ArenaError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== {} vs {} ({}x{}, {} ms/move) ===\n\n",
            self.player_one, self.player_two, self.width, self.height, self.time_limit_ms
        ));

        report.push_str(&format!(
            "{:>4}  {:<10} {:<10} {:>10}\n",
            "Ply", "Player", "Move", "Time (ms)"
        ));
        report.push_str(&"-".repeat(38));
        report.push('\n');
        for (ply, record) in self.history.iter().enumerate() {
            report.push_str(&format!(
                "{:>4}  {:<10} {:<10} {:>10.1}\n",
                ply + 1,
                record.player.to_string(),
                record.mv.to_string(),
                record.elapsed_ms
            ));
        }

        report.push('\n');
        report.push_str(&self.final_board);
        report.push('\n');
        report.push_str(&format!(
            "Winner: {} ({}), {} lost by {}\n",
            self.winner_name(),
            self.winner,
            self.name_of(self.loser()),
            self.termination
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
