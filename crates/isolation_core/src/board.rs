use std::fmt;

use crate::GameState;
use crate::error::GameError;
use crate::types::*;

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 7;

/// Knight-move isolation board.
///
/// Every cell a player has moved to stays blocked for the rest of the game.
/// A player that has not been placed yet may move to any blank cell; after
/// that it moves like a chess knight. The side to act with no legal move
/// loses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
    locations: [Option<Move>; 2],
    active: Player,
    move_count: u32,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            blocked: vec![false; width * height],
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn player_location(&self, player: Player) -> Option<Move> {
        self.locations[player.idx()]
    }

    fn index(&self, mv: Move) -> Option<usize> {
        let in_bounds = (0..self.height as i32).contains(&mv.row)
            && (0..self.width as i32).contains(&mv.col);
        in_bounds.then(|| mv.row as usize * self.width + mv.col as usize)
    }

    /// True if `mv` is on the board and nobody has occupied it yet.
    pub fn is_blank(&self, mv: Move) -> bool {
        self.index(mv).is_some_and(|i| !self.blocked[i])
    }

    /// All blank cells in row-major order.
    pub fn blank_spaces(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.blocked.len());
        for row in 0..self.height as i32 {
            for col in 0..self.width as i32 {
                let mv = Move::new(row, col);
                if self.is_blank(mv) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Moves available to `player`, regardless of whose turn it is.
    pub fn moves_for(&self, player: Player) -> Vec<Move> {
        let Some(from) = self.player_location(player) else {
            return self.blank_spaces();
        };
        KNIGHT_OFFSETS
            .iter()
            .map(|&(dr, dc)| Move::new(from.row + dr, from.col + dc))
            .filter(|&mv| self.is_blank(mv))
            .collect()
    }

    pub fn has_legal_moves(&self, player: Player) -> bool {
        match self.player_location(player) {
            None => self.blocked.iter().any(|&b| !b),
            Some(from) => KNIGHT_OFFSETS
                .iter()
                .any(|&(dr, dc)| self.is_blank(Move::new(from.row + dr, from.col + dc))),
        }
    }

    /// +inf if `player` has won, -inf if lost, 0 while the game is undecided.
    pub fn utility(&self, player: Player) -> f64 {
        if self.has_legal_moves(self.active) {
            0.0
        } else if player == self.active {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }

    /// Applies a move for the active player in place.
    ///
    /// Search code goes through [`GameState::forecast`]; this is for game
    /// loops that own their board.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        if !self.moves_for(self.active).contains(&mv) {
            return Err(GameError::IllegalMove {
                mv,
                player: self.active,
            });
        }
        if let Some(i) = self.index(mv) {
            self.blocked[i] = true;
        }
        self.locations[self.active.idx()] = Some(mv);
        self.active = self.active.opponent();
        self.move_count += 1;
        Ok(())
    }

    /// FNV-1a style hash over occupancy, locations and side to move.
    pub fn state_key(&self) -> u64 {
        fn mix(mut h: u64, x: u64) -> u64 {
            h ^= x;
            h = h.wrapping_mul(0x100000001b3);
            h
        }

        let mut h = 0xcbf29ce484222325u64;
        h = mix(h, self.active.idx() as u64 + 1);
        for loc in self.locations {
            h = match loc {
                Some(mv) => mix(h, 3 + (mv.row as u64) * 31 + mv.col as u64),
                None => mix(h, 2),
            };
        }
        for (i, &b) in self.blocked.iter().enumerate() {
            if b {
                h = mix(h, i as u64 + 1024);
            }
        }
        h
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            blocked: vec![false; DEFAULT_WIDTH * DEFAULT_HEIGHT],
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        }
    }
}

impl GameState for Board {
    fn active_player(&self) -> Player {
        self.active
    }

    fn legal_moves(&self) -> Vec<Move> {
        self.moves_for(self.active)
    }

    fn forecast(&self, mv: Move) -> Result<Self, GameError> {
        let mut next = self.clone();
        next.apply_move(mv)?;
        Ok(next)
    }

    fn is_winner(&self, player: Player) -> bool {
        player != self.active && !self.has_legal_moves(self.active)
    }

    fn is_loser(&self, player: Player) -> bool {
        player == self.active && !self.has_legal_moves(self.active)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height as i32 {
            let mut line = String::with_capacity(self.width * 4);
            for col in 0..self.width as i32 {
                let mv = Move::new(row, col);
                let symbol = if self.locations[0] == Some(mv) {
                    '1'
                } else if self.locations[1] == Some(mv) {
                    '2'
                } else if self.is_blank(mv) {
                    '-'
                } else {
                    'x'
                };
                line.push_str(" | ");
                line.push(symbol);
            }
            writeln!(f, "{} |", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
