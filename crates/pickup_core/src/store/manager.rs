use super::book::LeagueBook;
use super::error::StoreError;
use crate::models::{Position, Rating, SessionRecord, Team};
use chrono::NaiveDate;
use std::ffi::OsString;
use std::fs::{rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// JSON file holding a [`LeagueBook`].
///
/// Every mutating helper is a full load-modify-save cycle, so the file is the
/// single source of truth between runs.
#[derive(Debug, Clone)]
pub struct LeagueStore {
    path: PathBuf,
}

impl LeagueStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the book, creating an empty one on disk if the file is missing.
    pub fn load(&self) -> Result<LeagueBook, StoreError> {
        if !self.path.exists() {
            let book = LeagueBook::new();
            self.save(&book)?;
            log::info!("Initialised empty league book at {:?}", self.path);
            return Ok(book);
        }

        let mut file = File::open(&self.path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;

        let book: LeagueBook = serde_json::from_str(&data)?;
        log::debug!("Loaded {} bytes from {:?}", data.len(), self.path);
        Ok(book)
    }

    pub fn save(&self, book: &LeagueBook) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(book)?;

        // Atomic save: write to temp file, then rename
        let temp_path = self.temp_path();
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data.as_bytes())?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &self.path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }

    pub fn add_game(&self, record: SessionRecord) -> Result<LeagueBook, StoreError> {
        self.modify(|book| book.add_game(record))
    }

    pub fn update_game_teams(&self, date: NaiveDate, teams: Vec<Team>) -> Result<LeagueBook, StoreError> {
        self.modify(|book| book.update_game_teams(date, teams))
    }

    pub fn set_game_winner(&self, date: NaiveDate, winner: &str) -> Result<LeagueBook, StoreError> {
        self.modify(|book| book.set_game_winner(date, winner))
    }

    pub fn update_player(
        &self,
        name: &str,
        rating: Rating,
        position: Position,
    ) -> Result<LeagueBook, StoreError> {
        self.modify(|book| book.update_player(name, rating, position))
    }

    pub fn sync_player_stats(&self) -> Result<LeagueBook, StoreError> {
        self.modify(|book| {
            book.sync_player_stats();
            Ok(())
        })
    }

    /// Sibling of the data file with `.tmp` appended to its full name.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn modify<F>(&self, change: F) -> Result<LeagueBook, StoreError>
    where
        F: FnOnce(&mut LeagueBook) -> Result<(), StoreError>,
    {
        let mut book = self.load()?;
        change(&mut book)?;
        self.save(&book)?;
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = LeagueStore::open(temp_dir.path().join("league").join("soccer_team.json"));
        assert!(!store.exists());

        let book = store.load().unwrap();
        assert_eq!(book, LeagueBook::new());
        assert!(store.exists());
    }

    #[test]
    fn test_save_load_roundtrip_with_teams() {
        let temp_dir = TempDir::new().unwrap();
        let store = LeagueStore::open(temp_dir.path().join("soccer_team.json"));

        let teams = vec![
            Team::from_players(vec![Player::ad_hoc("Avi"), Player::ad_hoc("Ben")]),
            Team::from_players(vec![Player::ad_hoc("Carmel")]),
        ];
        store.add_game(SessionRecord::with_teams(date(2024, 3, 5), teams)).unwrap();
        store.set_game_winner(date(2024, 3, 5), "Team 1").unwrap();

        let book = store.load().unwrap();
        let game = book.game_on(date(2024, 3, 5)).unwrap();
        assert_eq!(game.winner.as_deref(), Some("Team 1"));
        assert_eq!(game.teams.as_ref().unwrap()[0].average_rating(), Some(3.0));
        assert_eq!(book.profile("Carmel").unwrap().tuesday_games, 1);
        assert!(!temp_dir.path().join("soccer_team.json.tmp").exists());
    }

    #[test]
    fn test_temp_path_never_collides() {
        let temp_dir = TempDir::new().unwrap();
        let json = LeagueStore::open(temp_dir.path().join("league.json"));
        let yaml = LeagueStore::open(temp_dir.path().join("league.yaml"));
        let tmp = LeagueStore::open(temp_dir.path().join("league.tmp"));

        assert_eq!(json.temp_path(), temp_dir.path().join("league.json.tmp"));
        assert_ne!(json.temp_path(), yaml.temp_path());
        assert_ne!(tmp.temp_path(), tmp.path().to_path_buf());

        tmp.save(&LeagueBook::new()).unwrap();
        assert_eq!(tmp.load().unwrap(), LeagueBook::new());
        assert!(!tmp.temp_path().exists());
    }

    #[test]
    fn test_failed_change_does_not_touch_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = LeagueStore::open(temp_dir.path().join("soccer_team.json"));
        store.add_game(SessionRecord::new(date(2024, 3, 5), vec!["Avi".to_string()])).unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        assert!(store.set_game_winner(date(2030, 1, 1), "Team 1").is_err());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_reads_legacy_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("soccer_team.json");
        std::fs::write(
            &path,
            r#"{
                "games": [
                    {"date": "2024-02-27", "day_of_week": "Tuesday", "players": ["Avi", "Ben"]}
                ],
                "players": {
                    "Avi": {"tuesday_games": 1, "saturday_games": 0, "total_games": 1,
                            "rating": 4.0, "position": "both", "past_teams": []},
                    "Ben": {"tuesday_games": 1, "saturday_games": 0, "total_games": 1}
                }
            }"#,
        )
        .unwrap();

        let book = LeagueStore::open(&path).load().unwrap();
        assert_eq!(book.games.len(), 1);
        assert_eq!(book.profile("Avi").unwrap().position, Position::Both);
        assert_eq!(book.profile("Ben").unwrap().rating.value(), 3.0);
    }
}
