//! Position evaluation strategies.
//!
//! Every strategy scores a board from one player's point of view: `+inf` if
//! that player has already won, `-inf` if it has lost, a finite value
//! otherwise. Any `Fn(&G, Player) -> f64` is accepted by the searchers, so the
//! functions below can be passed directly as well as through [`Heuristic`].

use std::fmt;
use std::str::FromStr;

use isolation_core::{Board, GameState, Player};
use serde::{Deserialize, Serialize};

/// Scores a game state from `player`'s perspective.
pub trait Evaluator<G> {
    fn score(&self, state: &G, player: Player) -> f64;
}

impl<G, F> Evaluator<G> for F
where
    F: Fn(&G, Player) -> f64,
{
    fn score(&self, state: &G, player: Player) -> f64 {
        self(state, player)
    }
}

/// Built-in evaluation strategies, selectable by name in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    Null,
    OpenMove,
    Improved,
    Center,
    #[default]
    WeightedMobility,
    MobilityCenter,
    MobilityDistance,
}

impl Heuristic {
    pub const ALL: [Heuristic; 7] = [
        Heuristic::Null,
        Heuristic::OpenMove,
        Heuristic::Improved,
        Heuristic::Center,
        Heuristic::WeightedMobility,
        Heuristic::MobilityCenter,
        Heuristic::MobilityDistance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Null => "null",
            Heuristic::OpenMove => "open_move",
            Heuristic::Improved => "improved",
            Heuristic::Center => "center",
            Heuristic::WeightedMobility => "weighted_mobility",
            Heuristic::MobilityCenter => "mobility_center",
            Heuristic::MobilityDistance => "mobility_distance",
        }
    }

    pub fn evaluate(self, board: &Board, player: Player) -> f64 {
        match self {
            Heuristic::Null => null_score(board, player),
            Heuristic::OpenMove => open_move_score(board, player),
            Heuristic::Improved => improved_score(board, player),
            Heuristic::Center => center_score(board, player),
            Heuristic::WeightedMobility => weighted_mobility_score(board, player),
            Heuristic::MobilityCenter => mobility_center_score(board, player),
            Heuristic::MobilityDistance => mobility_distance_score(board, player),
        }
    }
}

impl Evaluator<Board> for Heuristic {
    fn score(&self, state: &Board, player: Player) -> f64 {
        self.evaluate(state, player)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == key)
            .ok_or_else(|| format!("unknown heuristic: {}", s))
    }
}

/// `Some(score)` if the game is already decided for `player`.
fn decided(board: &Board, player: Player) -> Option<f64> {
    if board.is_loser(player) {
        Some(f64::NEG_INFINITY)
    } else if board.is_winner(player) {
        Some(f64::INFINITY)
    } else {
        None
    }
}

fn mobility(board: &Board, player: Player) -> (f64, f64) {
    (
        board.moves_for(player).len() as f64,
        board.moves_for(player.opponent()).len() as f64,
    )
}

/// Squared distance from the board center; 0 for an unplaced player.
fn center_distance(board: &Board, player: Player) -> f64 {
    let Some(loc) = board.player_location(player) else {
        return 0.0;
    };
    let w = board.width() as f64 / 2.0;
    let h = board.height() as f64 / 2.0;
    let y = loc.row as f64;
    let x = loc.col as f64;
    (h - y).powi(2) + (w - x).powi(2)
}

/// Game utility only: 0 until somebody is stuck.
pub fn null_score(board: &Board, player: Player) -> f64 {
    board.utility(player)
}

pub fn open_move_score(board: &Board, player: Player) -> f64 {
    if let Some(score) = decided(board, player) {
        return score;
    }
    board.moves_for(player).len() as f64
}

pub fn improved_score(board: &Board, player: Player) -> f64 {
    if let Some(score) = decided(board, player) {
        return score;
    }
    let (own, opp) = mobility(board, player);
    own - opp
}

pub fn center_score(board: &Board, player: Player) -> f64 {
    if let Some(score) = decided(board, player) {
        return score;
    }
    center_distance(board, player)
}

/// Own mobility counts ten times as much as the opponent's.
pub fn weighted_mobility_score(board: &Board, player: Player) -> f64 {
    if let Some(score) = decided(board, player) {
        return score;
    }
    let (own, opp) = mobility(board, player);
    10.0 * own - opp
}

/// Mobility difference, with distance from the center breaking ties.
pub fn mobility_center_score(board: &Board, player: Player) -> f64 {
    const MOVES_WEIGHT: f64 = 20.0;
    const CENTER_WEIGHT: f64 = 1.0;

    if let Some(score) = decided(board, player) {
        return score;
    }
    let (own, opp) = mobility(board, player);
    (own - opp) * MOVES_WEIGHT + center_distance(board, player) * CENTER_WEIGHT
}

/// Mobility difference scaled down as the players move apart.
pub fn mobility_distance_score(board: &Board, player: Player) -> f64 {
    if let Some(score) = decided(board, player) {
        return score;
    }
    let (own, opp) = mobility(board, player);
    let difference = own - 2.0 * opp;

    let own_loc = board.player_location(player);
    let opp_loc = board.player_location(player.opponent());
    match (own_loc, opp_loc) {
        (Some(a), Some(b)) => {
            let manhattan = (a.row - b.row).abs() + (a.col - b.col).abs();
            if manhattan == 0 {
                difference
            } else {
                difference / manhattan as f64
            }
        }
        _ => difference,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
