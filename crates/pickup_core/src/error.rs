use crate::models::ValidationError;
use thiserror::Error;

/// Failures of the allocation and rebalancing operations.
///
/// Every operation either returns a complete new team set or one of these;
/// inputs are never left half-modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid team count: {0}. Must be a positive integer")]
    InvalidTeamCount(i64),

    #[error("Player '{player}' is not in team {team_index}")]
    PlayerNotInTeam { player: String, team_index: usize },

    #[error("Team index {index} out of range for {team_count} teams")]
    TeamIndexOutOfRange { index: usize, team_count: usize },

    #[error("Player '{0}' appears more than once in the roster")]
    DuplicatePlayer(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Stable code used by the JSON API.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidTeamCount(_) => "INVALID_TEAM_COUNT",
            CoreError::PlayerNotInTeam { .. } => "PLAYER_NOT_IN_TEAM",
            CoreError::TeamIndexOutOfRange { .. } => "TEAM_INDEX_OUT_OF_RANGE",
            CoreError::DuplicatePlayer(_) => "DUPLICATE_PLAYER",
            CoreError::Validation(ValidationError::InvalidName(_)) => "INVALID_NAME",
            CoreError::Validation(ValidationError::InvalidRating(_))
            | CoreError::Validation(ValidationError::UnparsableRating(_)) => "INVALID_RATING",
            CoreError::Validation(ValidationError::InvalidPosition(_)) => "INVALID_POSITION",
            CoreError::Validation(ValidationError::InvalidGameDay(_)) => "INVALID_GAME_DAY",
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
