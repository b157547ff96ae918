//! Team allocator
//!
//! Splits a roster into a fixed number of teams with a single serpentine pass.
//! Optional rating sort happens first; optional position grouping then walks
//! the Goalkeeper, Defensive, Offensive and Both buckets in that order, all on
//! one shared cursor.

use super::serpentine::SerpentineCursor;
use crate::error::{CoreError, Result};
use crate::models::{Player, Position, Team};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Matchday default: teams of roughly this many players.
pub const PLAYERS_PER_TEAM: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOptions {
    #[serde(default)]
    pub sort_by_rating: bool,
    #[serde(default)]
    pub group_by_position: bool,
}

impl AllocationOptions {
    pub fn balanced() -> Self {
        Self { sort_by_rating: true, group_by_position: true }
    }
}

impl Default for AllocationOptions {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Non-fatal conditions of an allocation. Teams affected by these have no
/// average rating, and callers must render that rather than fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationWarning {
    /// No players at all; every team is empty.
    EmptyRoster,
    /// Fewer players than teams; the listed teams got nobody.
    EmptyTeams { indices: Vec<usize> },
}

/// Partition `players` into `team_count` teams.
///
/// Pure: the input is not touched and the same input always gives the same
/// teams. Every player lands in exactly one team and exactly `team_count`
/// teams are returned, some possibly empty.
pub fn allocate(
    players: &[Player],
    team_count: usize,
    options: AllocationOptions,
) -> Result<Vec<Team>> {
    check_team_count(team_count)?;
    check_unique_names(players)?;

    let mut pool: Vec<Player> = players.to_vec();
    if options.sort_by_rating {
        pool.sort_by(Player::cmp_by_rating_desc);
    }

    let teams = deal(pool, team_count, options.group_by_position);

    for warning in allocation_warnings(&teams) {
        warn!("Allocation warning: {:?}", warning);
    }
    debug!(
        "Allocated {} players into {} teams (sort_by_rating={}, group_by_position={})",
        players.len(),
        team_count,
        options.sort_by_rating,
        options.group_by_position
    );

    Ok(teams)
}

/// The "shuffle" action: like [`allocate`], but the roster order is shuffled
/// with a seeded RNG before the stable rating sort. With sorting on, only the
/// order among equally rated players changes; with sorting off the whole
/// draft order is random. The same seed always gives the same split.
pub fn shuffle_allocate(
    players: &[Player],
    team_count: usize,
    options: AllocationOptions,
    seed: u64,
) -> Result<Vec<Team>> {
    check_team_count(team_count)?;
    check_unique_names(players)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pool: Vec<Player> = players.to_vec();
    pool.shuffle(&mut rng);

    debug!("Shuffled roster of {} with seed {}", pool.len(), seed);
    allocate(&pool, team_count, options)
}

/// Inspect an allocation for empty teams.
pub fn allocation_warnings(teams: &[Team]) -> Vec<AllocationWarning> {
    let empty: Vec<usize> =
        teams.iter().enumerate().filter(|(_, t)| t.is_empty()).map(|(i, _)| i).collect();

    if empty.is_empty() {
        Vec::new()
    } else if empty.len() == teams.len() {
        vec![AllocationWarning::EmptyRoster]
    } else {
        vec![AllocationWarning::EmptyTeams { indices: empty }]
    }
}

/// Default team count for a matchday with `player_count` sign-ups: one team
/// per five players, at most `max_teams`, never fewer than one.
pub fn suggested_team_count(player_count: usize, max_teams: usize) -> usize {
    player_count.div_ceil(PLAYERS_PER_TEAM).clamp(1, max_teams.max(1))
}

fn deal(pool: Vec<Player>, team_count: usize, group_by_position: bool) -> Vec<Team> {
    let mut rosters: Vec<Vec<Player>> = vec![Vec::new(); team_count];
    let mut cursor = SerpentineCursor::new(team_count);

    let draft_order: Vec<Player> = if group_by_position {
        Position::BUCKET_ORDER
            .iter()
            .flat_map(|bucket| pool.iter().filter(move |p| p.position == *bucket))
            .cloned()
            .collect()
    } else {
        pool
    };

    for (player, team_index) in draft_order.into_iter().zip(cursor.by_ref()) {
        rosters[team_index].push(player);
    }

    rosters.into_iter().map(Team::from_players).collect()
}

fn check_team_count(team_count: usize) -> Result<()> {
    if team_count == 0 {
        return Err(CoreError::InvalidTeamCount(0));
    }
    Ok(())
}

fn check_unique_names(players: &[Player]) -> Result<()> {
    unique_names(players.iter())
}

/// Reject a team set in which any player appears more than once, within one
/// team or across teams.
pub fn validate_unique(teams: &[Team]) -> Result<()> {
    unique_names(teams.iter().flat_map(|t| t.players()))
}

fn unique_names<'a>(players: impl Iterator<Item = &'a Player>) -> Result<()> {
    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player.name.as_str()) {
            return Err(CoreError::DuplicatePlayer(player.name.clone()));
        }
    }
    Ok(())
}
