use isolation_core::{GameError, SearchTimeout};
use thiserror::Error;

/// Why a fixed-depth search did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The deadline tripped somewhere in the tree. Only the top-level driver
    /// handles this.
    #[error(transparent)]
    Timeout(#[from] SearchTimeout),
    #[error(transparent)]
    Game(#[from] GameError),
}
