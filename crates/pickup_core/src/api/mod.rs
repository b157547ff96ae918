// JSON entry points for external front ends

pub mod json_api;

pub use json_api::{
    allocate_teams_json, move_player_json, sort_teams_json, AllocateTeamsRequest,
    AllocateTeamsResponse, ApiError, ApiResponse, MovePlayerRequest, PlayerInput, SortTeamsRequest,
    TeamsResponse, API_VERSION,
};
