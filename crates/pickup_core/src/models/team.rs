use super::player::Player;
use serde::{Deserialize, Serialize};

/// One side of a session: an ordered roster plus its mean rating.
///
/// `average_rating` is derived from `players` and is `None` for an empty team.
/// The fields are private so the average cannot drift from the membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", from = "RawTeam")]
pub struct Team {
    players: Vec<Player>,
    average_rating: Option<f64>,
}

/// Wire shape of a stored team. A stored `averageRating` is ignored and
/// recomputed from the players.
#[derive(Deserialize)]
struct RawTeam {
    #[serde(default)]
    players: Vec<Player>,
}

impl From<RawTeam> for Team {
    fn from(raw: RawTeam) -> Self {
        Team::from_players(raw.players)
    }
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_players(players: Vec<Player>) -> Self {
        let average_rating = mean_rating(&players);
        Self { players, average_rating }
    }

    /// Display label for the team at `index` ("Team 1", "Team 2", ...).
    pub fn label(index: usize) -> String {
        format!("Team {}", index + 1)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn average_rating(&self) -> Option<f64> {
        self.average_rating
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    /// Copy of this team with the roster re-ordered by rating, best first.
    /// Stable: equal ratings keep their relative order.
    pub fn sorted_by_rating(&self) -> Team {
        let mut players = self.players.clone();
        players.sort_by(Player::cmp_by_rating_desc);
        Team { players, average_rating: self.average_rating }
    }

    pub(crate) fn push(&mut self, player: Player) {
        self.players.push(player);
        self.average_rating = mean_rating(&self.players);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.name == name)?;
        let player = self.players.remove(idx);
        self.average_rating = mean_rating(&self.players);
        Some(player)
    }
}

fn mean_rating(players: &[Player]) -> Option<f64> {
    if players.is_empty() {
        return None;
    }
    let sum: f64 = players.iter().map(|p| p.rating.value()).sum();
    Some(sum / players.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Position, Rating};

    fn player(name: &str, rating: f64) -> Player {
        Player::new(name, Rating::new(rating).unwrap(), Position::Both)
    }

    #[test]
    fn test_average_tracks_membership() {
        let mut team = Team::from_players(vec![player("A", 5.0), player("B", 3.0)]);
        assert_eq!(team.average_rating(), Some(4.0));

        team.push(player("C", 1.0));
        assert_eq!(team.average_rating(), Some(3.0));

        team.remove("A");
        assert_eq!(team.average_rating(), Some(2.0));

        team.remove("B");
        team.remove("C");
        assert!(team.is_empty());
        assert_eq!(team.average_rating(), None);
    }

    #[test]
    fn test_deserialize_recomputes_average() {
        let json = r#"{
            "players": [
                {"name": "A", "rating": 4.0, "position": "Both"},
                {"name": "B", "rating": 2.0, "position": "Defensive"}
            ],
            "averageRating": 99.0
        }"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.average_rating(), Some(3.0));
    }

    #[test]
    fn test_empty_team_serializes_null_average() {
        let json = serde_json::to_value(Team::new()).unwrap();
        assert_eq!(json["averageRating"], serde_json::Value::Null);
        assert_eq!(json["players"], serde_json::json!([]));
    }

    #[test]
    fn test_label() {
        assert_eq!(Team::label(0), "Team 1");
        assert_eq!(Team::label(2), "Team 3");
    }
}
