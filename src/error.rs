use std::path::PathBuf;

use crate::game::GameOutcome;

/// Reasons a move request is rejected. A rejected move never touches the
/// board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is already over ({0})")]
    GameOver(GameOutcome),
}

/// Errors that can occur when loading configuration or building a board.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid board dimensions {rows}x{cols} (both must be at least 4)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("failed to parse board: {0}")]
    BoardParse(String),
}
