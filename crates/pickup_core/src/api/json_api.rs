//! JSON API for team operations
//!
//! String-in, string-out entry points for front ends that talk JSON. Every
//! call answers with an [`ApiResponse`] envelope; failures carry a stable
//! error code instead of a panic or a bare message.

use crate::allocation::{
    allocate, allocation_warnings, move_player, shuffle_allocate, sort_all_teams_by_rating,
    validate_unique, AllocationOptions, AllocationWarning,
};
use crate::error::CoreError;
use crate::models::{Player, PlayerValidator, Position, Rating, Team, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(
        code: &str,
        message: &str,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: Some(details) }
    }

    pub fn invalid_json(e: &serde_json::Error) -> Self {
        Self::new("INVALID_JSON", &format!("Invalid JSON format: {}", e))
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        Self::new(error.code(), &error.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        CoreError::from(error).into()
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A roster entry as typed in by a client. Rating and position are optional
/// and fall back to the ad hoc defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInput {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub position: Option<String>,
}

impl PlayerInput {
    fn into_player(self) -> Result<Player, ValidationError> {
        PlayerValidator::validate_name(&self.name)?;
        let rating = match self.rating {
            Some(value) => Rating::new(value)?,
            None => Rating::default(),
        };
        let position = match self.position {
            Some(text) => text.parse::<Position>()?,
            None => Position::default(),
        };
        Ok(Player::new(self.name.trim(), rating, position))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateTeamsRequest {
    pub schema_version: Option<String>,
    pub players: Vec<PlayerInput>,
    /// Signed so that negative counts are reported as such rather than as
    /// malformed JSON.
    pub team_count: i64,
    #[serde(default)]
    pub options: AllocationOptions,
    /// When present the roster is shuffled with this seed first.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateTeamsResponse {
    pub teams: Vec<Team>,
    pub warnings: Vec<AllocationWarning>,
    pub seed_used: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlayerRequest {
    pub schema_version: Option<String>,
    pub teams: Vec<Team>,
    pub player_name: String,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortTeamsRequest {
    pub schema_version: Option<String>,
    pub teams: Vec<Team>,
}

/// Response of the move and sort calls: the new snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsResponse {
    pub teams: Vec<Team>,
}

/// Allocate players into teams from a JSON request string
///
/// # Returns
/// JSON string containing `ApiResponse<AllocateTeamsResponse>`
pub fn allocate_teams_json(request_json: &str) -> String {
    info!("Processing team allocation request");

    let request: AllocateTeamsRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse AllocateTeamsRequest: {}", e);
            return ApiResponse::<AllocateTeamsResponse>::error(ApiError::invalid_json(&e)).to_json();
        }
    };

    match allocate_from_request(request) {
        Ok(data) => {
            info!(
                "Allocated {} teams with {} warnings",
                data.teams.len(),
                data.warnings.len()
            );
            ApiResponse::success(data).to_json()
        }
        Err(error) => {
            warn!("Team allocation failed: {}", error.message);
            ApiResponse::<AllocateTeamsResponse>::error(error).to_json()
        }
    }
}

fn allocate_from_request(request: AllocateTeamsRequest) -> Result<AllocateTeamsResponse, ApiError> {
    let team_count = usize::try_from(request.team_count)
        .ok()
        .filter(|n| *n > 0)
        .ok_or(CoreError::InvalidTeamCount(request.team_count))?;

    let players = request
        .players
        .into_iter()
        .map(PlayerInput::into_player)
        .collect::<Result<Vec<Player>, ValidationError>>()?;

    let teams = match request.seed {
        Some(seed) => shuffle_allocate(&players, team_count, request.options, seed)?,
        None => allocate(&players, team_count, request.options)?,
    };
    let warnings = allocation_warnings(&teams);

    Ok(AllocateTeamsResponse { teams, warnings, seed_used: request.seed })
}

/// Move one player between teams from a JSON request string
///
/// # Returns
/// JSON string containing `ApiResponse<TeamsResponse>`
pub fn move_player_json(request_json: &str) -> String {
    info!("Processing move player request");

    let request: MovePlayerRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse MovePlayerRequest: {}", e);
            return ApiResponse::<TeamsResponse>::error(ApiError::invalid_json(&e)).to_json();
        }
    };

    match move_player(&request.teams, &request.player_name, request.from, request.to) {
        Ok(teams) => ApiResponse::success(TeamsResponse { teams }).to_json(),
        Err(e) => {
            warn!("Move of {} failed: {}", request.player_name, e);
            let mut details = HashMap::new();
            details.insert("player".to_string(), serde_json::json!(request.player_name));
            details.insert("from".to_string(), serde_json::json!(request.from));
            details.insert("to".to_string(), serde_json::json!(request.to));
            let error = ApiError::with_details(e.code(), &e.to_string(), details);
            ApiResponse::<TeamsResponse>::error(error).to_json()
        }
    }
}

/// Sort every team roster by rating from a JSON request string
///
/// # Returns
/// JSON string containing `ApiResponse<TeamsResponse>`
pub fn sort_teams_json(request_json: &str) -> String {
    info!("Processing sort teams request");

    match serde_json::from_str::<SortTeamsRequest>(request_json) {
        Ok(request) => match validate_unique(&request.teams) {
            Ok(()) => {
                let teams = sort_all_teams_by_rating(&request.teams);
                ApiResponse::success(TeamsResponse { teams }).to_json()
            }
            Err(e) => {
                warn!("Refusing to sort teams: {}", e);
                ApiResponse::<TeamsResponse>::error(e.into()).to_json()
            }
        },
        Err(e) => {
            error!("Failed to parse SortTeamsRequest: {}", e);
            ApiResponse::<TeamsResponse>::error(ApiError::invalid_json(&e)).to_json()
        }
    }
}
