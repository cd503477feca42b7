use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("invalid game record: {0}")]
    Record(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] isolation_core::GameError),
}

impl ArenaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArenaError::Io {
            path: path.into(),
            source,
        }
    }
}
