//! TOML configuration for a game between two agents

use std::path::Path;

use baseline_engine::{GreedyAgent, RandomAgent};
use clap::ValueEnum;
use isolation_core::{Agent, Board, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use search_engine::{SearchAgent, SearchConfig};
use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Everything needed to set up one game.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Per-move time limit in milliseconds
    pub time_limit_ms: u64,
    pub board: BoardConfig,
    pub player_one: AgentConfig,
    pub player_two: AgentConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 150,
            board: BoardConfig::default(),
            player_one: AgentConfig::new(AgentKind::AlphaBeta),
            player_two: AgentConfig::new(AgentKind::Greedy),
        }
    }
}

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self, ArenaError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ArenaError::io(path, e))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ArenaError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String, ArenaError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl BoardConfig {
    pub fn build(&self) -> Result<Board, ArenaError> {
        Ok(Board::new(self.width, self.height)?)
    }
}

/// Which kind of player to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Random,
    Greedy,
    Minimax,
    #[default]
    AlphaBeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub kind: AgentKind,
    /// Display name for search players (derived from the settings if absent)
    pub name: Option<String>,
    /// Seed for the random player
    pub seed: Option<u64>,
    /// Search settings; greedy players only use the heuristic
    pub search: SearchConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(AgentKind::default())
    }
}

impl AgentConfig {
    pub fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            name: None,
            seed: None,
            search: SearchConfig::default(),
        }
    }

    pub fn build(&self) -> Box<dyn Agent> {
        match self.kind {
            AgentKind::Random => Box::new(match self.seed {
                Some(seed) => RandomAgent::seeded(seed),
                None => RandomAgent::new(),
            }),
            AgentKind::Greedy => Box::new(GreedyAgent::new(self.search.heuristic)),
            AgentKind::Minimax | AgentKind::AlphaBeta => {
                let search = SearchConfig {
                    use_alpha_beta: self.kind == AgentKind::AlphaBeta,
                    ..self.search.clone()
                };
                match &self.name {
                    Some(name) => Box::new(SearchAgent::with_name(name.clone(), search)),
                    None => Box::new(SearchAgent::new(search)),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
