//! Validation for roster data
//!
//! Ratings, positions, names and game days arrive as free text or loose
//! numbers from stored records and command-line input. Everything is checked
//! here before it reaches the allocator.

use std::fmt;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name is empty or too long
    InvalidName(String),

    /// Rating outside 1.0..=5.0 or not on a half-point step
    InvalidRating(f64),

    /// Rating text that is not a number
    UnparsableRating(String),

    /// Position label that is not part of the closed set
    InvalidPosition(String),

    /// Day label that is not a weekday
    InvalidGameDay(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidName(msg) => write!(f, "Invalid name: {}", msg),
            ValidationError::InvalidRating(rating) => {
                write!(
                    f,
                    "Invalid rating: {}. Must be between 1.0 and 5.0 in steps of 0.5",
                    rating
                )
            }
            ValidationError::UnparsableRating(text) => {
                write!(f, "Invalid rating: '{}' is not a number", text)
            }
            ValidationError::InvalidPosition(pos) => write!(
                f,
                "Invalid position: {}. Expected Offensive, Defensive, Goalkeeper or Both",
                pos
            ),
            ValidationError::InvalidGameDay(day) => write!(f, "Invalid day of week: {}", day),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Player validation utility
pub struct PlayerValidator;

impl PlayerValidator {
    /// Validate player name (non-empty after trimming, at most 50 characters)
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidName("Name cannot be empty".to_string()));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::InvalidName(format!(
                "Name cannot exceed {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(())
    }

    /// Validate rating (1.0-5.0, half-point increments)
    pub fn validate_rating(rating: f64) -> Result<(), ValidationError> {
        if !rating.is_finite() || !(1.0..=5.0).contains(&rating) {
            return Err(ValidationError::InvalidRating(rating));
        }

        if (rating * 2.0).fract() != 0.0 {
            return Err(ValidationError::InvalidRating(rating));
        }

        Ok(())
    }

    /// Split free-text input into trimmed, non-empty, de-duplicated names.
    ///
    /// First occurrence wins, so the sign-up order is preserved.
    pub fn parse_name_list(text: &str) -> Result<Vec<String>, ValidationError> {
        let mut names: Vec<String> = Vec::new();
        for line in text.lines().flat_map(|line| line.split(',')) {
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            Self::validate_name(name)?;
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}
