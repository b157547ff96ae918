use crate::error::CoreError;
use crate::models::ValidationError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No game recorded on {date}")]
    GameNotFound { date: NaiveDate },

    #[error("No player named '{name}'")]
    PlayerNotFound { name: String },

    #[error("A game is already recorded on {date}")]
    DuplicateGame { date: NaiveDate },

    #[error("Unknown winner '{winner}'. Expected one of: {}", expected.join(", "))]
    UnknownWinner { winner: String, expected: Vec<String> },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::GameNotFound { .. } => true,
            StoreError::PlayerNotFound { .. } => true,
            StoreError::UnknownWinner { .. } => true,
            StoreError::Validation(_) => true,
            StoreError::DuplicateGame { .. } => false,
            StoreError::Json(_) => false,
            StoreError::Core(_) => false,
        }
    }
}
