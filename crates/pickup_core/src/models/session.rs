use super::player::{Position, Rating};
use super::team::Team;
use super::validation::ValidationError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week a session was played on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl GameDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameDay::Sunday => "Sunday",
            GameDay::Monday => "Monday",
            GameDay::Tuesday => "Tuesday",
            GameDay::Wednesday => "Wednesday",
            GameDay::Thursday => "Thursday",
            GameDay::Friday => "Friday",
            GameDay::Saturday => "Saturday",
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Days with their own attendance counter in a player profile.
    pub fn is_tracked(&self) -> bool {
        matches!(self, GameDay::Tuesday | GameDay::Thursday | GameDay::Saturday)
    }
}

impl From<Weekday> for GameDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sun => GameDay::Sunday,
            Weekday::Mon => GameDay::Monday,
            Weekday::Tue => GameDay::Tuesday,
            Weekday::Wed => GameDay::Wednesday,
            Weekday::Thu => GameDay::Thursday,
            Weekday::Fri => GameDay::Friday,
            Weekday::Sat => GameDay::Saturday,
        }
    }
}

impl fmt::Display for GameDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameDay {
    type Err = ValidationError;

    /// Accepts full names and the one-letter shortcuts of the old prompt
    /// (T = Tuesday, H = Thursday, S = Saturday).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(GameDay::Sunday),
            "monday" | "mon" => Ok(GameDay::Monday),
            "tuesday" | "tue" | "t" => Ok(GameDay::Tuesday),
            "wednesday" | "wed" => Ok(GameDay::Wednesday),
            "thursday" | "thu" | "h" => Ok(GameDay::Thursday),
            "friday" | "fri" => Ok(GameDay::Friday),
            "saturday" | "sat" | "s" => Ok(GameDay::Saturday),
            _ => Err(ValidationError::InvalidGameDay(s.to_string())),
        }
    }
}

/// One day's pickup game as it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub day_of_week: GameDay,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl SessionRecord {
    pub fn new(date: NaiveDate, players: Vec<String>) -> Self {
        Self { date, day_of_week: GameDay::of_date(date), players, teams: None, winner: None }
    }

    /// Commit a reviewed allocation: the participant list is taken from the
    /// teams so the two can never disagree.
    pub fn with_teams(date: NaiveDate, teams: Vec<Team>) -> Self {
        let players = teams.iter().flat_map(|t| t.names()).collect();
        Self { date, day_of_week: GameDay::of_date(date), players, teams: Some(teams), winner: None }
    }

    pub fn team_labels(&self) -> Vec<String> {
        match &self.teams {
            Some(teams) => (0..teams.len()).map(Team::label).collect(),
            None => Vec::new(),
        }
    }
}

/// Stored per-player profile: attendance counters plus rating and position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlayerProfile {
    #[serde(default)]
    pub tuesday_games: u32,
    #[serde(default)]
    pub thursday_games: u32,
    #[serde(default)]
    pub saturday_games: u32,
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub position: Position,
    /// Rosters this player has been part of, one list of team-mates per game.
    #[serde(default)]
    pub past_teams: Vec<Vec<String>>,
}

impl PlayerProfile {
    pub fn games_on(&self, day: GameDay) -> u32 {
        match day {
            GameDay::Tuesday => self.tuesday_games,
            GameDay::Thursday => self.thursday_games,
            GameDay::Saturday => self.saturday_games,
            _ => 0,
        }
    }

    pub fn record_attendance(&mut self, day: GameDay) {
        match day {
            GameDay::Tuesday => self.tuesday_games += 1,
            GameDay::Thursday => self.thursday_games += 1,
            GameDay::Saturday => self.saturday_games += 1,
            _ => {}
        }
        self.total_games += 1;
    }

    pub fn reset_attendance(&mut self) {
        self.tuesday_games = 0;
        self.thursday_games = 0;
        self.saturday_games = 0;
        self.total_games = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Player;

    #[test]
    fn test_game_day_of_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        assert_eq!(GameDay::of_date(date), GameDay::Tuesday);
    }

    #[test]
    fn test_game_day_parse() {
        assert_eq!("T".parse::<GameDay>().unwrap(), GameDay::Tuesday);
        assert_eq!("h".parse::<GameDay>().unwrap(), GameDay::Thursday);
        assert_eq!("Saturday".parse::<GameDay>().unwrap(), GameDay::Saturday);
        assert!("Funday".parse::<GameDay>().is_err());
    }

    #[test]
    fn test_profile_defaults_on_sparse_json() {
        let profile: PlayerProfile =
            serde_json::from_str(r#"{"tuesday_games": 4, "total_games": 6}"#).unwrap();
        assert_eq!(profile.tuesday_games, 4);
        assert_eq!(profile.thursday_games, 0);
        assert_eq!(profile.rating.value(), 3.0);
        assert_eq!(profile.position, Position::Both);
        assert!(profile.past_teams.is_empty());
    }

    #[test]
    fn test_record_attendance_untracked_day_counts_total_only() {
        let mut profile = PlayerProfile::default();
        profile.record_attendance(GameDay::Monday);
        profile.record_attendance(GameDay::Saturday);
        assert_eq!(profile.total_games, 2);
        assert_eq!(profile.saturday_games, 1);
        assert_eq!(profile.games_on(GameDay::Monday), 0);
    }

    #[test]
    fn test_session_with_teams_collects_players() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let teams = vec![
            Team::from_players(vec![Player::ad_hoc("A"), Player::ad_hoc("B")]),
            Team::from_players(vec![Player::ad_hoc("C")]),
        ];
        let record = SessionRecord::with_teams(date, teams);
        assert_eq!(record.players, vec!["A", "B", "C"]);
        assert_eq!(record.day_of_week, GameDay::Saturday);
        assert_eq!(record.team_labels(), vec!["Team 1", "Team 2"]);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-03-02");
        assert_eq!(json["day_of_week"], "Saturday");
        assert!(json.get("winner").is_none());
    }
}
