//! Manual rebalancing of an existing allocation.
//!
//! Both operations take the current snapshot by reference and hand back a new
//! one, so callers can keep the old snapshot for undo.

use super::allocator::validate_unique;
use crate::error::{CoreError, Result};
use crate::models::Team;
use tracing::{debug, info};

/// Move `player_name` from team `from` to team `to`.
///
/// The two affected teams are re-sorted by rating and get fresh averages;
/// every other team is returned unchanged. Moving a player onto their own
/// team is an identity operation. A snapshot that already lists someone
/// twice is rejected with [`CoreError::DuplicatePlayer`].
pub fn move_player(teams: &[Team], player_name: &str, from: usize, to: usize) -> Result<Vec<Team>> {
    check_index(teams, from)?;
    check_index(teams, to)?;
    validate_unique(teams)?;

    if !teams[from].contains(player_name) {
        return Err(CoreError::PlayerNotInTeam {
            player: player_name.to_string(),
            team_index: from,
        });
    }

    if from == to {
        debug!("Ignoring move of {} onto its own team {}", player_name, from);
        return Ok(teams.to_vec());
    }

    let mut next = teams.to_vec();
    let player = next[from].remove(player_name).ok_or_else(|| CoreError::PlayerNotInTeam {
        player: player_name.to_string(),
        team_index: from,
    })?;
    next[to].push(player);

    next[from] = next[from].sorted_by_rating();
    next[to] = next[to].sorted_by_rating();

    info!("Moved {} from {} to {}", player_name, Team::label(from), Team::label(to));
    Ok(next)
}

/// Order every roster by rating, best first. Membership and averages are
/// unchanged; equal ratings keep their current order.
pub fn sort_all_teams_by_rating(teams: &[Team]) -> Vec<Team> {
    teams.iter().map(Team::sorted_by_rating).collect()
}

fn check_index(teams: &[Team], index: usize) -> Result<()> {
    if index >= teams.len() {
        return Err(CoreError::TeamIndexOutOfRange { index, team_count: teams.len() });
    }
    Ok(())
}
