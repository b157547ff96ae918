//! Drag-and-drop reassignment protocol.
//!
//! A gesture starts on a player inside an origin team, reports a candidate
//! drop zone (team index or nothing) while the pointer moves, and commits at
//! most one [`move_player`] on release. Nothing is mutated mid-gesture.

use super::rebalance::move_player;
use crate::error::{CoreError, Result};
use crate::models::Team;
use tracing::trace;

/// Vertical layout of the team drop zones on the review screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZoneLayout {
    /// Distance from the top of the screen to the first team card.
    pub top_offset: f32,
    /// Height of one team card.
    pub zone_height: f32,
}

impl Default for DropZoneLayout {
    fn default() -> Self {
        Self { top_offset: 100.0, zone_height: 200.0 }
    }
}

/// Team index under the pointer, if any.
pub fn drop_zone_for_pointer(pointer_y: f32, layout: DropZoneLayout, team_count: usize) -> Option<usize> {
    if !pointer_y.is_finite() || layout.zone_height <= 0.0 {
        return None;
    }
    let zone = ((pointer_y - layout.top_offset) / layout.zone_height).floor();
    if zone < 0.0 {
        return None;
    }
    let zone = zone as usize;
    (zone < team_count).then_some(zone)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    player: String,
    origin: usize,
    team_count: usize,
    drop_zone: Option<usize>,
}

impl DragGesture {
    /// Pick up `player` from team `origin`.
    pub fn begin(teams: &[Team], player: &str, origin: usize) -> Result<Self> {
        let team = teams
            .get(origin)
            .ok_or(CoreError::TeamIndexOutOfRange { index: origin, team_count: teams.len() })?;
        if !team.contains(player) {
            return Err(CoreError::PlayerNotInTeam {
                player: player.to_string(),
                team_index: origin,
            });
        }
        Ok(Self { player: player.to_string(), origin, team_count: teams.len(), drop_zone: None })
    }

    /// Report the current candidate target. Indices outside the team list
    /// clear the hint.
    pub fn hover(&mut self, zone: Option<usize>) {
        self.drop_zone = zone.filter(|z| *z < self.team_count);
        trace!("Drag of {} hovering over {:?}", self.player, self.drop_zone);
    }

    /// Convenience for pointer-driven callers.
    pub fn hover_pointer(&mut self, pointer_y: f32, layout: DropZoneLayout) {
        self.hover(drop_zone_for_pointer(pointer_y, layout, self.team_count));
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn drop_zone(&self) -> Option<usize> {
        self.drop_zone
    }

    /// Finish the gesture. Returns the new snapshot when a move was made, or
    /// `None` when the player was dropped nowhere or back on their own team.
    pub fn release(self, teams: &[Team]) -> Result<Option<Vec<Team>>> {
        match self.drop_zone {
            Some(target) if target != self.origin => {
                move_player(teams, &self.player, self.origin, target).map(Some)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;

    fn teams() -> Vec<Team> {
        vec![
            Team::from_players(vec![Player::ad_hoc("A"), Player::ad_hoc("B")]),
            Team::from_players(vec![Player::ad_hoc("C")]),
            Team::from_players(vec![Player::ad_hoc("D")]),
        ]
    }

    #[test]
    fn test_drop_zone_for_pointer() {
        let layout = DropZoneLayout::default();
        assert_eq!(drop_zone_for_pointer(50.0, layout, 3), None);
        assert_eq!(drop_zone_for_pointer(100.0, layout, 3), Some(0));
        assert_eq!(drop_zone_for_pointer(299.0, layout, 3), Some(0));
        assert_eq!(drop_zone_for_pointer(300.0, layout, 3), Some(1));
        assert_eq!(drop_zone_for_pointer(650.0, layout, 3), Some(2));
        assert_eq!(drop_zone_for_pointer(700.0, layout, 3), None);
    }

    #[test]
    fn test_release_commits_last_hint_only() {
        let teams = teams();
        let mut gesture = DragGesture::begin(&teams, "A", 0).unwrap();
        gesture.hover(Some(2));
        gesture.hover(Some(1));
        let moved = gesture.release(&teams).unwrap().unwrap();
        assert!(moved[1].contains("A"));
        assert!(!moved[0].contains("A"));
        assert!(!moved[2].contains("A"));
    }

    #[test]
    fn test_release_without_target_is_noop() {
        let teams = teams();
        let mut gesture = DragGesture::begin(&teams, "A", 0).unwrap();
        gesture.hover(Some(1));
        gesture.hover(None);
        assert_eq!(gesture.release(&teams).unwrap(), None);

        let mut gesture = DragGesture::begin(&teams, "A", 0).unwrap();
        gesture.hover(Some(0));
        assert_eq!(gesture.release(&teams).unwrap(), None);
    }

    #[test]
    fn test_out_of_range_hover_clears_hint() {
        let teams = teams();
        let mut gesture = DragGesture::begin(&teams, "C", 1).unwrap();
        gesture.hover(Some(9));
        assert_eq!(gesture.drop_zone(), None);
        gesture.hover_pointer(150.0, DropZoneLayout::default());
        assert_eq!(gesture.drop_zone(), Some(0));
    }

    #[test]
    fn test_begin_requires_membership() {
        let teams = teams();
        assert!(matches!(
            DragGesture::begin(&teams, "C", 0),
            Err(CoreError::PlayerNotInTeam { .. })
        ));
        assert!(matches!(
            DragGesture::begin(&teams, "C", 7),
            Err(CoreError::TeamIndexOutOfRange { .. })
        ));
    }
}
