//! League book: the whole persisted document
//!
//! Holds the game history (newest first) and one profile per player. All
//! mutations go through here so attendance counters and team history stay in
//! step with the game list.

use super::error::StoreError;
use crate::allocation::validate_unique;
use crate::models::{
    GameDay, Player, PlayerProfile, PlayerValidator, Position, Rating, SessionRecord, Team,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Where allocation input takes its ratings and positions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSource {
    /// Stored profiles; names without a profile fall back to ad hoc defaults.
    Profiles,
    /// Every name gets the ad hoc defaults (3.0, Both).
    AdHoc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LeagueBook {
    #[serde(default)]
    pub games: Vec<SessionRecord>,
    #[serde(default)]
    pub players: BTreeMap<String, PlayerProfile>,
}

impl LeagueBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game_on(&self, date: NaiveDate) -> Option<&SessionRecord> {
        self.games.iter().find(|g| g.date == date)
    }

    pub fn profile(&self, name: &str) -> Option<&PlayerProfile> {
        self.players.get(name)
    }

    /// Record a played game and update every participant's profile.
    ///
    /// A name listed twice counts once. Teams that repeat a player are
    /// rejected.
    pub fn add_game(&mut self, mut record: SessionRecord) -> Result<(), StoreError> {
        if self.game_on(record.date).is_some() {
            return Err(StoreError::DuplicateGame { date: record.date });
        }
        for name in &record.players {
            PlayerValidator::validate_name(name)?;
        }
        if let Some(teams) = &record.teams {
            validate_unique(teams)?;
            if record.players.is_empty() {
                record.players = teams.iter().flat_map(|t| t.names()).collect();
            }
        }
        let mut seen = HashSet::with_capacity(record.players.len());
        record.players.retain(|name| seen.insert(name.clone()));

        for name in &record.players {
            self.players.entry(name.clone()).or_default().record_attendance(record.day_of_week);
        }
        if let Some(teams) = &record.teams {
            self.remember_teams(teams);
        }

        log::info!(
            "Recorded {} game on {} with {} players",
            record.day_of_week,
            record.date,
            record.players.len()
        );
        self.games.insert(0, record);
        Ok(())
    }

    /// Attach (or replace) the team split of an already recorded game.
    pub fn update_game_teams(&mut self, date: NaiveDate, teams: Vec<Team>) -> Result<(), StoreError> {
        let idx = self.game_index(date)?;
        validate_unique(&teams)?;
        if let Some(previous) = self.games[idx].teams.take() {
            self.forget_teams(&previous);
        }
        self.remember_teams(&teams);
        self.games[idx].teams = Some(teams);

        log::info!("Updated teams for game on {}", date);
        Ok(())
    }

    /// Declare the winning team of a game. When the game has teams, the
    /// winner must be one of their labels.
    pub fn set_game_winner(&mut self, date: NaiveDate, winner: &str) -> Result<(), StoreError> {
        let idx = self.game_index(date)?;
        let game = &mut self.games[idx];

        let labels = game.team_labels();
        if !labels.is_empty() && !labels.iter().any(|l| l == winner) {
            return Err(StoreError::UnknownWinner { winner: winner.to_string(), expected: labels });
        }
        game.winner = Some(winner.to_string());

        log::info!("Set winner of game on {} to {}", date, winner);
        Ok(())
    }

    /// Edit a player's rating and position.
    pub fn update_player(
        &mut self,
        name: &str,
        rating: Rating,
        position: Position,
    ) -> Result<(), StoreError> {
        let profile = self
            .players
            .get_mut(name)
            .ok_or_else(|| StoreError::PlayerNotFound { name: name.to_string() })?;
        profile.rating = rating;
        profile.position = position;
        log::debug!("Updated {}: rating {}, position {}", name, rating, position);
        Ok(())
    }

    /// Recompute every attendance counter from the game list. Players that
    /// only appear in games get a default profile.
    pub fn sync_player_stats(&mut self) {
        for profile in self.players.values_mut() {
            profile.reset_attendance();
        }
        for game in &self.games {
            for name in &game.players {
                self.players.entry(name.clone()).or_default().record_attendance(game.day_of_week);
            }
        }
        log::info!(
            "Synchronised stats for {} players over {} games",
            self.players.len(),
            self.games.len()
        );
    }

    /// Build allocator input for `names`.
    pub fn resolve_players(
        &self,
        names: &[String],
        source: RosterSource,
    ) -> Result<Vec<Player>, StoreError> {
        names
            .iter()
            .map(|name| -> Result<Player, StoreError> {
                PlayerValidator::validate_name(name)?;
                let player = match (source, self.players.get(name)) {
                    (RosterSource::Profiles, Some(profile)) => {
                        Player::new(name.clone(), profile.rating, profile.position)
                    }
                    _ => Player::ad_hoc(name.clone()),
                };
                Ok(player)
            })
            .collect()
    }

    /// Player names, most games played first. Ties are alphabetical.
    pub fn players_by_attendance(&self) -> Vec<(&str, &PlayerProfile)> {
        let mut players: Vec<(&str, &PlayerProfile)> =
            self.players.iter().map(|(name, profile)| (name.as_str(), profile)).collect();
        players.sort_by(|a, b| b.1.total_games.cmp(&a.1.total_games));
        players
    }

    /// Games played on `day`, newest first.
    pub fn games_on_day(&self, day: GameDay) -> impl Iterator<Item = &SessionRecord> {
        self.games.iter().filter(move |g| g.day_of_week == day)
    }

    fn game_index(&self, date: NaiveDate) -> Result<usize, StoreError> {
        self.games.iter().position(|g| g.date == date).ok_or(StoreError::GameNotFound { date })
    }

    fn remember_teams(&mut self, teams: &[Team]) {
        for team in teams {
            let roster = team.names();
            for name in &roster {
                self.players.entry(name.clone()).or_default().past_teams.push(roster.clone());
            }
        }
    }

    fn forget_teams(&mut self, teams: &[Team]) {
        for team in teams {
            let roster = team.names();
            for name in &roster {
                if let Some(profile) = self.players.get_mut(name) {
                    if let Some(pos) = profile.past_teams.iter().rposition(|t| *t == roster) {
                        profile.past_teams.remove(pos);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_game_updates_counters_and_order() {
        let mut book = LeagueBook::new();
        book.add_game(SessionRecord::new(date(2024, 2, 27), names(&["Avi", "Ben"]))).unwrap();
        book.add_game(SessionRecord::new(date(2024, 3, 2), names(&["Avi"]))).unwrap();

        assert_eq!(book.games[0].date, date(2024, 3, 2));
        let avi = book.profile("Avi").unwrap();
        assert_eq!(avi.tuesday_games, 1);
        assert_eq!(avi.saturday_games, 1);
        assert_eq!(avi.total_games, 2);
        assert_eq!(book.profile("Ben").unwrap().total_games, 1);
        assert_eq!(book.profile("Ben").unwrap().rating.value(), 3.0);
    }

    #[test]
    fn test_add_game_rejects_duplicate_date() {
        let mut book = LeagueBook::new();
        book.add_game(SessionRecord::new(date(2024, 2, 27), names(&["Avi"]))).unwrap();
        let err = book.add_game(SessionRecord::new(date(2024, 2, 27), names(&["Ben"])));
        assert!(matches!(err, Err(StoreError::DuplicateGame { .. })));
        assert_eq!(book.games.len(), 1);
    }

    #[test]
    fn test_teams_are_remembered_and_replaced() {
        let mut book = LeagueBook::new();
        let teams = vec![
            Team::from_players(vec![Player::ad_hoc("A"), Player::ad_hoc("B")]),
            Team::from_players(vec![Player::ad_hoc("C")]),
        ];
        book.add_game(SessionRecord::with_teams(date(2024, 3, 5), teams)).unwrap();
        assert_eq!(book.profile("A").unwrap().past_teams, vec![names(&["A", "B"])]);

        let replacement = vec![
            Team::from_players(vec![Player::ad_hoc("A"), Player::ad_hoc("C")]),
            Team::from_players(vec![Player::ad_hoc("B")]),
        ];
        book.update_game_teams(date(2024, 3, 5), replacement).unwrap();
        assert_eq!(book.profile("A").unwrap().past_teams, vec![names(&["A", "C"])]);
        assert_eq!(book.profile("B").unwrap().past_teams, vec![names(&["B"])]);
    }

    #[test]
    fn test_repeated_names_count_once() {
        let mut book = LeagueBook::new();
        book.add_game(SessionRecord::new(date(2024, 2, 27), names(&["Avi", "Ben", "Avi"]))).unwrap();
        assert_eq!(book.games[0].players, names(&["Avi", "Ben"]));
        assert_eq!(book.profile("Avi").unwrap().total_games, 1);
        assert_eq!(book.profile("Avi").unwrap().tuesday_games, 1);
    }

    #[test]
    fn test_teams_repeating_a_player_are_rejected() {
        let mut book = LeagueBook::new();
        let teams = vec![
            Team::from_players(vec![Player::ad_hoc("A")]),
            Team::from_players(vec![Player::ad_hoc("A")]),
        ];
        let err = book.add_game(SessionRecord::with_teams(date(2024, 3, 5), teams.clone()));
        assert!(matches!(err, Err(StoreError::Core(CoreError::DuplicatePlayer(_)))));
        assert!(book.games.is_empty());
        assert!(book.profile("A").is_none());

        book.add_game(SessionRecord::new(date(2024, 3, 5), names(&["A"]))).unwrap();
        let err = book.update_game_teams(date(2024, 3, 5), teams);
        assert!(matches!(err, Err(StoreError::Core(CoreError::DuplicatePlayer(_)))));
        assert!(book.games[0].teams.is_none());
    }

    #[test]
    fn test_set_winner_checks_labels() {
        let mut book = LeagueBook::new();
        let teams = vec![Team::from_players(vec![Player::ad_hoc("A")]), Team::new()];
        book.add_game(SessionRecord::with_teams(date(2024, 3, 5), teams)).unwrap();

        assert!(matches!(
            book.set_game_winner(date(2024, 3, 5), "Team 7"),
            Err(StoreError::UnknownWinner { .. })
        ));
        book.set_game_winner(date(2024, 3, 5), "Team 2").unwrap();
        assert_eq!(book.games[0].winner.as_deref(), Some("Team 2"));

        assert!(matches!(
            book.set_game_winner(date(2025, 1, 1), "Team 1"),
            Err(StoreError::GameNotFound { .. })
        ));
    }

    #[test]
    fn test_sync_player_stats_recounts() {
        let mut book = LeagueBook::new();
        book.add_game(SessionRecord::new(date(2024, 2, 27), names(&["Avi"]))).unwrap();
        book.players.get_mut("Avi").unwrap().total_games = 40;
        book.games[0].players.push("Gil".to_string());

        book.sync_player_stats();
        assert_eq!(book.profile("Avi").unwrap().total_games, 1);
        assert_eq!(book.profile("Gil").unwrap().tuesday_games, 1);
    }

    #[test]
    fn test_resolve_players_uses_profiles_or_defaults() {
        let mut book = LeagueBook::new();
        book.add_game(SessionRecord::new(date(2024, 2, 27), names(&["Avi"]))).unwrap();
        book.update_player("Avi", Rating::new(4.5).unwrap(), Position::Goalkeeper).unwrap();

        let roster = names(&["Avi", "New"]);
        let resolved = book.resolve_players(&roster, RosterSource::Profiles).unwrap();
        assert_eq!(resolved[0].rating.value(), 4.5);
        assert_eq!(resolved[0].position, Position::Goalkeeper);
        assert_eq!(resolved[1], Player::ad_hoc("New"));

        let ad_hoc = book.resolve_players(&roster, RosterSource::AdHoc).unwrap();
        assert_eq!(ad_hoc[0], Player::ad_hoc("Avi"));
    }

    #[test]
    fn test_update_unknown_player() {
        let mut book = LeagueBook::new();
        let err = book.update_player("Nobody", Rating::default(), Position::Both);
        assert!(matches!(err, Err(StoreError::PlayerNotFound { .. })));
    }

    #[test]
    fn test_players_by_attendance() {
        let mut book = LeagueBook::new();
        book.add_game(SessionRecord::new(date(2024, 2, 27), names(&["Ben", "Avi"]))).unwrap();
        book.add_game(SessionRecord::new(date(2024, 2, 29), names(&["Ben"]))).unwrap();
        book.add_game(SessionRecord::new(date(2024, 3, 2), names(&["Carmel"]))).unwrap();

        let order: Vec<&str> = book.players_by_attendance().iter().map(|(n, _)| *n).collect();
        assert_eq!(order, vec!["Ben", "Avi", "Carmel"]);
    }
}
