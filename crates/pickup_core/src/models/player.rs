use super::validation::{PlayerValidator, ValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A player as the allocator sees it.
///
/// `name` is the identity: it must be unique within one allocation run and is
/// what the rebalancer matches on when a player is moved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub rating: Rating,
    pub position: Position,
}

impl Player {
    pub fn new(name: impl Into<String>, rating: Rating, position: Position) -> Self {
        Self { name: name.into(), rating, position }
    }

    /// A player typed in on the spot, with no stored profile behind them.
    pub fn ad_hoc(name: impl Into<String>) -> Self {
        Self::new(name, Rating::default(), Position::default())
    }

    /// Descending by rating. Used with stable sorts so ties keep input order.
    pub fn cmp_by_rating_desc(a: &Player, b: &Player) -> Ordering {
        b.rating.cmp(&a.rating)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Position {
    #[serde(alias = "offensive", alias = "OFFENSIVE")]
    Offensive,
    #[serde(alias = "defensive", alias = "DEFENSIVE")]
    Defensive,
    #[serde(alias = "goalkeeper", alias = "GOALKEEPER")]
    Goalkeeper,
    #[default]
    #[serde(alias = "both", alias = "BOTH")]
    Both,
}

impl Position {
    /// Bucket order used when the allocator groups by position.
    pub const BUCKET_ORDER: [Position; 4] =
        [Position::Goalkeeper, Position::Defensive, Position::Offensive, Position::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Offensive => "Offensive",
            Position::Defensive => "Defensive",
            Position::Goalkeeper => "Goalkeeper",
            Position::Both => "Both",
        }
    }

    /// Decode the numeric menu choice of the rating prompt
    /// (1=Defensive, 2=Offensive, 3=Both, 4=Goalkeeper).
    pub fn from_menu_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Position::Defensive),
            2 => Some(Position::Offensive),
            3 => Some(Position::Both),
            4 => Some(Position::Goalkeeper),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offensive" => Ok(Position::Offensive),
            "defensive" => Ok(Position::Defensive),
            "goalkeeper" => Ok(Position::Goalkeeper),
            "both" => Ok(Position::Both),
            _ => Err(ValidationError::InvalidPosition(s.to_string())),
        }
    }
}

/// Skill rating on the 1.0..=5.0 scale in half-point steps.
///
/// Construction always validates, so every `Rating` in the system is finite
/// and totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;
    pub const DEFAULT: f64 = 3.0;

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        PlayerValidator::validate_rating(value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl Eq for Rating {}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Rating {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl FromStr for Rating {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 =
            s.trim().parse().map_err(|_| ValidationError::UnparsableRating(s.trim().to_string()))?;
        Rating::new(value)
    }
}
