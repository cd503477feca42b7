//! Game Runner for isolation agents
//!
//! This crate provides infrastructure for:
//! - Playing a single game between two agents under a per-move time limit
//! - Loading agent and board settings from TOML files
//! - Saving game records as JSON and printing reports
//!
//! # Usage
//!
//! ```bash
//! # Alpha-beta with iterative deepening against the greedy baseline
//! cargo run -p arena -- play --p1 alpha-beta --p2 greedy
//!
//! # Settings from a file, record saved for later inspection
//! cargo run -p arena -- play --config configs/default.toml --save game.json
//! ```

mod config;
mod error;
mod match_runner;
mod results;

pub use config::*;
pub use error::ArenaError;
pub use match_runner::*;
pub use results::*;
