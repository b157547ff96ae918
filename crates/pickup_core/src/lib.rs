//! # pickup_core - Balanced Teams for Pickup Football
//!
//! Splits a night's sign-ups into rating-balanced teams, lets the organiser
//! move players between teams afterwards, and keeps the attendance history
//! that decides who plays when too many people turn up.
//!
//! ## Features
//! - Deterministic serpentine allocation (same roster = same teams)
//! - Optional rating sort and position grouping
//! - Rebalancing moves on immutable snapshots
//! - Attendance counters, sign-up priority and team history
//! - JSON API for front ends

pub mod allocation;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod store;

// Re-export main API functions
pub use allocation::{
    allocate, move_player, shuffle_allocate, sort_all_teams_by_rating, AllocationOptions,
    AllocationWarning,
};
pub use api::{allocate_teams_json, move_player_json, sort_teams_json};
pub use config::LeagueConfig;
pub use error::{CoreError, Result};
pub use models::{GameDay, Player, Position, Rating, SessionRecord, Team};
pub use store::{LeagueBook, LeagueStore, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
