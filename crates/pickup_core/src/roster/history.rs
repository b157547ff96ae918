//! Questions answered from the game history.

use crate::models::{GameDay, Team};
use crate::store::LeagueBook;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Attendance dates of two players side by side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlayerComparison {
    pub first_dates: BTreeSet<NaiveDate>,
    pub second_dates: BTreeSet<NaiveDate>,
}

impl PlayerComparison {
    /// Dates the first player attended without the second.
    pub fn only_first(&self) -> Vec<NaiveDate> {
        self.first_dates.difference(&self.second_dates).copied().collect()
    }

    pub fn only_second(&self) -> Vec<NaiveDate> {
        self.second_dates.difference(&self.first_dates).copied().collect()
    }

    pub fn together(&self) -> Vec<NaiveDate> {
        self.first_dates.intersection(&self.second_dates).copied().collect()
    }
}

/// Compare the attendance of `first` and `second`, optionally restricted to
/// games played on `day`.
pub fn compare_players(
    book: &LeagueBook,
    first: &str,
    second: &str,
    day: Option<GameDay>,
) -> PlayerComparison {
    let dates_of = |name: &str| -> BTreeSet<NaiveDate> {
        book.games
            .iter()
            .filter(|g| day.map_or(true, |d| g.day_of_week == d))
            .filter(|g| g.players.iter().any(|p| p == name))
            .map(|g| g.date)
            .collect()
    };

    PlayerComparison { first_dates: dates_of(first), second_dates: dates_of(second) }
}

/// How familiar each team already is with itself: for every player, the
/// number of current teammates they have shared a team with before.
/// Lower means a fresher mix.
pub fn teammate_overlap(teams: &[Team], book: &LeagueBook) -> Vec<usize> {
    teams
        .iter()
        .map(|team| {
            let roster = team.names();
            roster
                .iter()
                .map(|name| {
                    let Some(profile) = book.profile(name) else {
                        return 0;
                    };
                    let past: HashSet<&str> = profile
                        .past_teams
                        .iter()
                        .flatten()
                        .map(String::as_str)
                        .filter(|mate| *mate != name.as_str())
                        .collect();
                    roster.iter().filter(|mate| past.contains(mate.as_str())).count()
                })
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, SessionRecord};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn team(list: &[&str]) -> Team {
        Team::from_players(list.iter().map(|n| Player::ad_hoc(*n)).collect())
    }

    #[test]
    fn test_compare_players() {
        let mut book = LeagueBook::new();
        book.add_game(SessionRecord::new(date(2, 27), names(&["Avi", "Ben"]))).unwrap();
        book.add_game(SessionRecord::new(date(3, 2), names(&["Avi"]))).unwrap();
        book.add_game(SessionRecord::new(date(3, 5), names(&["Ben"]))).unwrap();

        let all = compare_players(&book, "Avi", "Ben", None);
        assert_eq!(all.together(), vec![date(2, 27)]);
        assert_eq!(all.only_first(), vec![date(3, 2)]);
        assert_eq!(all.only_second(), vec![date(3, 5)]);

        let tuesdays = compare_players(&book, "Avi", "Ben", Some(GameDay::Tuesday));
        assert!(tuesdays.only_first().is_empty());
        assert_eq!(tuesdays.second_dates.len(), 2);
    }

    #[test]
    fn test_teammate_overlap() {
        let mut book = LeagueBook::new();
        let previous = vec![team(&["A", "B"]), team(&["C", "D"])];
        book.add_game(SessionRecord::with_teams(date(3, 5), previous)).unwrap();

        let same_again = vec![team(&["A", "B"]), team(&["C", "D"])];
        assert_eq!(teammate_overlap(&same_again, &book), vec![2, 2]);

        let mixed = vec![team(&["A", "C"]), team(&["B", "D", "New"])];
        assert_eq!(teammate_overlap(&mixed, &book), vec![0, 0]);
    }
}
