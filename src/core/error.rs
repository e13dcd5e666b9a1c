//! Error types.
//!
//! Command rejections are ordinary values: the engine reports them and
//! leaves its state untouched. Nothing here is fatal to a match.

use thiserror::Error;

/// Why a command was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("the match is over")]
    MatchOver,
    #[error("it is not the player's turn")]
    NotPlayerTurn,
    #[error("a target confirmation is pending")]
    SelectionPending,
    #[error("no card is waiting for a target")]
    NoPendingSelection,
    #[error("card index {index} out of range for a hand of {hand_len}")]
    CardIndexOutOfRange { index: usize, hand_len: usize },
    #[error("enemy turn ticket is no longer current")]
    StaleEnemyTurn,
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scheduler construction failures.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
