//! Serpentine (boustrophedon) draft cursor
//!
//! Yields team indices 0, 1, .., n-1, n-1, .., 0, 0, 1, .. so that the team
//! picking last in one pass picks first in the next.

#[derive(Debug, Clone)]
pub struct SerpentineCursor {
    team_count: usize,
    current: usize,
    forward: bool,
}

impl SerpentineCursor {
    /// `team_count` must be at least 1; the allocator checks this before
    /// building a cursor.
    pub fn new(team_count: usize) -> Self {
        debug_assert!(team_count > 0, "serpentine cursor needs at least one team");
        Self { team_count, current: 0, forward: true }
    }

    /// Index the next player will be assigned to.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    fn advance(&mut self) {
        if self.forward {
            if self.current + 1 == self.team_count {
                self.forward = false;
            } else {
                self.current += 1;
            }
        } else if self.current == 0 {
            self.forward = true;
        } else {
            self.current -= 1;
        }
    }
}

impl Iterator for SerpentineCursor {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let index = self.current;
        self.advance();
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_teams_snake() {
        let order: Vec<usize> = SerpentineCursor::new(2).take(8).collect();
        assert_eq!(order, vec![0, 1, 1, 0, 0, 1, 1, 0]);
    }

    #[test]
    fn test_three_teams_snake() {
        let order: Vec<usize> = SerpentineCursor::new(3).take(9).collect();
        assert_eq!(order, vec![0, 1, 2, 2, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn test_single_team_always_zero() {
        let order: Vec<usize> = SerpentineCursor::new(1).take(5).collect();
        assert_eq!(order, vec![0; 5]);
    }

    #[test]
    fn test_direction_flips_at_boundaries() {
        let mut cursor = SerpentineCursor::new(3);
        cursor.by_ref().take(3).for_each(drop);
        assert_eq!(cursor.position(), 2);
        assert!(!cursor.is_forward());
    }
}
