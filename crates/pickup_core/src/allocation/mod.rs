//! Team allocation and manual rebalancing

pub mod allocator;
pub mod drag;
pub mod rebalance;
pub mod serpentine;


pub use allocator::{
    allocate, allocation_warnings, shuffle_allocate, suggested_team_count, validate_unique,
    AllocationOptions, AllocationWarning,
};
pub use drag::{drop_zone_for_pointer, DragGesture, DropZoneLayout};
pub use rebalance::{move_player, sort_all_teams_by_rating};
pub use serpentine::SerpentineCursor;
