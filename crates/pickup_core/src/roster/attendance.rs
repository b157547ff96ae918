//! Sign-up prioritisation
//!
//! When more people sign up than fit on the pitch, regulars of that weekday go
//! first. A couple of spots after the main squad are kept for whoever signed up
//! earliest among the rest, so newcomers still get a chance.

use crate::models::{GameDay, PlayerProfile, ValidationError};
use crate::store::LeagueBook;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which counter ranks the sign-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceDay {
    Day(GameDay),
    /// Rank by total games on any day.
    All,
}

impl AttendanceDay {
    pub fn games(&self, profile: &PlayerProfile) -> u32 {
        match self {
            AttendanceDay::Day(day) => profile.games_on(*day),
            AttendanceDay::All => profile.total_games,
        }
    }
}

impl fmt::Display for AttendanceDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceDay::Day(day) => write!(f, "{}", day),
            AttendanceDay::All => f.write_str("All Games"),
        }
    }
}

impl FromStr for AttendanceDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "a" | "all games" => Ok(AttendanceDay::All),
            _ => s.parse::<GameDay>().map(AttendanceDay::Day),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityRules {
    /// Spots handed out strictly by attendance.
    pub main_squad: usize,
    /// Spots after the main squad handed out by sign-up order.
    pub input_order_slots: usize,
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self { main_squad: 13, input_order_slots: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityEntry {
    pub name: String,
    pub day_games: u32,
    pub total_games: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PriorityList {
    pub confirmed: Vec<PriorityEntry>,
    pub by_sign_up: Vec<PriorityEntry>,
    pub on_hold: Vec<PriorityEntry>,
}

impl PriorityList {
    /// Final order: confirmed, then sign-up slots, then the waiting list.
    pub fn names(&self) -> Vec<&str> {
        self.confirmed
            .iter()
            .chain(&self.by_sign_up)
            .chain(&self.on_hold)
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.confirmed.len() + self.by_sign_up.len() + self.on_hold.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rank `names` (in sign-up order) for a game on `day`.
///
/// Unknown names count as zero games. Ranking is stable, so equal records keep
/// sign-up order.
pub fn priority_list(
    book: &LeagueBook,
    names: &[String],
    day: AttendanceDay,
    rules: PriorityRules,
) -> PriorityList {
    let entries: Vec<PriorityEntry> = names
        .iter()
        .map(|name| {
            let (day_games, total_games) = book
                .profile(name)
                .map(|profile| (day.games(profile), profile.total_games))
                .unwrap_or((0, 0));
            PriorityEntry { name: name.clone(), day_games, total_games }
        })
        .collect();

    let mut ranked = entries.clone();
    ranked.sort_by(|a, b| {
        b.day_games.cmp(&a.day_games).then_with(|| b.total_games.cmp(&a.total_games))
    });

    let split = rules.main_squad.min(ranked.len());
    let mut remaining = ranked.split_off(split);
    let confirmed = ranked;

    let mut by_sign_up = Vec::with_capacity(rules.input_order_slots);
    for entry in &entries {
        if by_sign_up.len() == rules.input_order_slots {
            break;
        }
        if let Some(pos) = remaining.iter().position(|r| r.name == entry.name) {
            by_sign_up.push(remaining.remove(pos));
        }
    }

    PriorityList { confirmed, by_sign_up, on_hold: remaining }
}
